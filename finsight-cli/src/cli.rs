use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "finsight")]
#[command(version)]
#[command(about = "AI-powered financial document analysis", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Gemini API key (overrides GOOGLE_API_KEY / GEMINI_API_KEY / config file)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Model id, e.g. gemini-2.5-pro
    #[arg(short, long, global = true)]
    pub model: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze one financial document and produce a full report
    Analyze {
        /// Path to the document text file, or `-` for stdin
        document: PathBuf,

        /// Write the JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save the JSON report under a timestamped default name
        #[arg(short, long)]
        save: bool,
    },

    /// Compare two companies' documents side by side
    Compare {
        /// Path to company A's document
        company_a: PathBuf,

        /// Path to company B's document
        company_b: PathBuf,

        /// Write the JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save the JSON report under a timestamped default name
        #[arg(short, long)]
        save: bool,
    },
}

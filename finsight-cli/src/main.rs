//! finsight — AI-powered financial document analysis from the command line.

mod cli;
mod config;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use finsight_analysis::{Analyst, ComparisonReport, PipelineReport};
use finsight_core::document_type_description;
use finsight_model::GeminiModel;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.api_key, cli.model)?;
    info!(model = %config.model, "starting finsight");

    let model = GeminiModel::new(config.api_key, config.model)?;
    let analyst = Analyst::from_model(Arc::new(model));

    match cli.command {
        Commands::Analyze { document, output, save } => {
            analyze(&analyst, &document, output, save).await
        }
        Commands::Compare { company_a, company_b, output, save } => {
            compare(&analyst, &company_a, &company_b, output, save).await
        }
    }
}

async fn analyze(
    analyst: &Analyst,
    document: &Path,
    output: Option<PathBuf>,
    save: bool,
) -> Result<()> {
    let text = read_document(document)?;
    let report = analyst.process_document(&text).await?;

    print_report(&report)?;

    if let Some(path) = export_path(output, save, || report.default_filename()) {
        report.save(&path)?;
        println!("\nReport saved to {}", path.display());
    }
    Ok(())
}

async fn compare(
    analyst: &Analyst,
    company_a: &Path,
    company_b: &Path,
    output: Option<PathBuf>,
    save: bool,
) -> Result<()> {
    let text_a = read_document(company_a)?;
    let text_b = read_document(company_b)?;
    let report = analyst.compare(&text_a, &text_b).await?;

    print_comparison(&report)?;

    if let Some(path) = export_path(output, save, || report.default_filename()) {
        report.save(&path)?;
        println!("\nReport saved to {}", path.display());
    }
    Ok(())
}

/// Read a document from a file, or from stdin when the path is `-`.
fn read_document(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read document from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read document {}", path.display()))
}

/// Where to write the JSON artifact: an explicit `--output` path, the
/// timestamped default name under `--save`, or nowhere.
fn export_path(
    output: Option<PathBuf>,
    save: bool,
    default_name: impl FnOnce() -> String,
) -> Option<PathBuf> {
    output.or_else(|| save.then(|| PathBuf::from(default_name())))
}

fn print_report(report: &PipelineReport) -> Result<()> {
    println!("\n=== Document Classification ===");
    println!("{}", report.document_type);
    if let Some(description) = document_type_description(&report.document_type) {
        println!("{description}");
    }

    println!("\n=== Financial Metrics ===");
    println!("{}", serde_json::to_string_pretty(&report.metrics)?);

    println!("\n=== Risk Analysis ===");
    println!("{}", serde_json::to_string_pretty(&report.risks)?);

    println!("\n=== Investment Thesis ===");
    println!("{}", serde_json::to_string_pretty(&report.thesis)?);

    println!("\n=== Quality Check ===");
    println!("{}", report.quality_check);

    println!("\n=== Executive Summary ===");
    println!("{}", report.summary);

    println!("\nAnalyzed by {} at {}", report.ai_model, report.processing_time.to_rfc3339());
    Ok(())
}

fn print_comparison(report: &ComparisonReport) -> Result<()> {
    println!("\n=== Company Comparison ===");
    println!("{}", serde_json::to_string_pretty(&report.comparison)?);
    println!("\nAnalyzed by {} at {}", report.ai_model, report.processing_time.to_rfc3339());
    Ok(())
}

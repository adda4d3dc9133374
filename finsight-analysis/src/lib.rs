//! # finsight-analysis
//!
//! Resilient response parsing and the document-analysis pipeline.
//!
//! ## Overview
//!
//! [`Analyst`] sequences six analysis steps over one document — classify,
//! extract metrics, analyze risks, generate thesis, quality-check,
//! summarize — and assembles a [`PipelineReport`]. A comparison mode runs
//! the side-by-side task over two documents.
//!
//! Failures never abort a run: model errors arrive as sentinel text from
//! the model client, and unparseable replies are absorbed by
//! [`parse_structured`]'s schema-shaped fallback. Every invocation ends in
//! a complete report.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use finsight_analysis::Analyst;
//! use finsight_model::MockModel;
//!
//! # async fn run() -> finsight_core::Result<()> {
//! let analyst = Analyst::from_model(Arc::new(MockModel::with_reply("investment_memo")));
//! let report = analyst.process_document("Q3 revenue grew 12% to $4.1B...").await?;
//! println!("{}", report.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```

pub mod parser;
pub mod pipeline;
pub mod report;

pub use parser::{AnalysisResult, parse_structured};
pub use pipeline::Analyst;
pub use report::{ComparisonReport, PipelineReport};

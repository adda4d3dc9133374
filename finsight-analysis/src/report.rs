//! Report types and their JSON export.

use std::path::Path;

use chrono::{DateTime, Local};
use finsight_core::Result;
use serde::{Deserialize, Serialize};

use crate::parser::AnalysisResult;

/// Aggregated outcome of the six-step analysis pipeline.
///
/// Field names are the export schema; nested analysis mappings serialize
/// verbatim, including any `raw_response` fallback markers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    pub document_type: String,
    pub metrics: AnalysisResult,
    pub risks: AnalysisResult,
    pub thesis: AnalysisResult,
    pub quality_check: String,
    pub summary: String,
    pub processing_time: DateTime<Local>,
    pub ai_model: String,
}

impl PipelineReport {
    /// The report as pretty-printed JSON, the exported artifact.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Timestamped default name for the exported artifact.
    pub fn default_filename(&self) -> String {
        format!("finsight_analysis_{}.json", self.processing_time.format("%Y%m%d_%H%M%S"))
    }

    /// Write the report as pretty JSON to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

/// Outcome of a side-by-side company comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub comparison: AnalysisResult,
    pub processing_time: DateTime<Local>,
    pub ai_model: String,
}

impl ComparisonReport {
    /// The report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Timestamped default name for the exported artifact.
    pub fn default_filename(&self) -> String {
        format!("finsight_comparison_{}.json", self.processing_time.format("%Y%m%d_%H%M%S"))
    }

    /// Write the report as pretty JSON to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

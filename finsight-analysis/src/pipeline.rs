//! The six-step document-analysis pipeline.
//!
//! Every step degrades instead of halting: model failures arrive as
//! sentinel text from [`ModelClient`] and unparseable replies are absorbed
//! by the parser fallback, so a run always ends in a complete
//! [`PipelineReport`]. The one hard failure is a missing template slot,
//! raised during rendering before any model call.

use std::sync::Arc;

use chrono::Local;
use finsight_core::{AnalysisTask, Result, TextModel, prompt, truncate_chars};
use finsight_model::ModelClient;
use serde_json::{Value, json};
use tracing::info;

use crate::parser::{AnalysisResult, parse_structured};
use crate::report::{ComparisonReport, PipelineReport};

/// Document budget for the classification prompt.
const CLASSIFY_CHARS: usize = 2000;
/// Document budget for the metrics, risk and thesis prompts.
const ANALYZE_CHARS: usize = 3000;
/// Per-side budget for the comparison prompt.
const COMPARE_CHARS: usize = 1500;

/// Runs analysis tasks against a model and assembles reports.
///
/// Stateless across invocations; each document produces an independent
/// report. Steps run strictly in sequence, one model round trip at a time.
pub struct Analyst {
    client: ModelClient,
}

impl Analyst {
    pub fn new(client: ModelClient) -> Self {
        Self { client }
    }

    /// Convenience constructor over any [`TextModel`].
    pub fn from_model(model: Arc<dyn TextModel>) -> Self {
        Self::new(ModelClient::new(model))
    }

    /// Classify the document into one of the known categories.
    ///
    /// The reply is trimmed and lowercased; an empty reply maps to
    /// `"unknown"`.
    pub async fn classify_document(&self, document: &str) -> Result<String> {
        let prompt = prompt::render(
            AnalysisTask::Classifier,
            &[("document", truncate_chars(document, CLASSIFY_CHARS))],
        )?;
        let reply = self.client.generate_text(&prompt).await;
        if reply.is_empty() {
            Ok("unknown".to_string())
        } else {
            Ok(reply.trim().to_lowercase())
        }
    }

    /// Extract key financial metrics.
    pub async fn extract_metrics(&self, document: &str) -> Result<AnalysisResult> {
        self.document_analysis(AnalysisTask::MetricsExtractor, document).await
    }

    /// Identify market, operational, financial and regulatory risks.
    pub async fn analyze_risks(&self, document: &str) -> Result<AnalysisResult> {
        self.document_analysis(AnalysisTask::RiskAnalyzer, document).await
    }

    /// Generate an investment thesis.
    pub async fn generate_thesis(&self, document: &str) -> Result<AnalysisResult> {
        self.document_analysis(AnalysisTask::ThesisGenerator, document).await
    }

    /// Review accumulated analysis for consistency and completeness.
    /// The reply is kept as plain text.
    pub async fn quality_check(&self, analysis: &Value) -> Result<String> {
        self.review_analysis(AnalysisTask::QualityChecker, analysis).await
    }

    /// Produce an executive summary of the accumulated analysis.
    /// The reply is kept as plain text.
    pub async fn generate_summary(&self, analysis: &Value) -> Result<String> {
        self.review_analysis(AnalysisTask::SummaryGenerator, analysis).await
    }

    /// Run all six steps over one document and assemble the report.
    pub async fn process_document(&self, document: &str) -> Result<PipelineReport> {
        info!(model = self.client.model_name(), "processing document");

        info!("classifying document type");
        let document_type = self.classify_document(document).await?;

        info!("extracting financial metrics");
        let metrics = self.extract_metrics(document).await?;

        info!("analyzing risks");
        let risks = self.analyze_risks(document).await?;

        info!("generating investment thesis");
        let thesis = self.generate_thesis(document).await?;

        info!("quality checking analysis");
        let quality_check = self
            .quality_check(&json!({
                "metrics": metrics,
                "risks": risks,
                "thesis": thesis,
            }))
            .await?;

        info!("generating executive summary");
        let summary = self
            .generate_summary(&json!({
                "metrics": metrics,
                "risks": risks,
                "thesis": thesis,
                "quality_check": quality_check,
            }))
            .await?;

        Ok(PipelineReport {
            document_type,
            metrics,
            risks,
            thesis,
            quality_check,
            summary,
            processing_time: Local::now(),
            ai_model: self.client.model_name().to_string(),
        })
    }

    /// Compare two companies' documents side by side.
    pub async fn compare(&self, company_a: &str, company_b: &str) -> Result<ComparisonReport> {
        info!(model = self.client.model_name(), "comparing companies");
        let prompt = prompt::render(
            AnalysisTask::ComparativeAnalyzer,
            &[
                ("company_a", truncate_chars(company_a, COMPARE_CHARS)),
                ("company_b", truncate_chars(company_b, COMPARE_CHARS)),
            ],
        )?;
        let reply = self.client.generate_text(&prompt).await;
        Ok(ComparisonReport {
            comparison: parse_structured(AnalysisTask::ComparativeAnalyzer, &reply),
            processing_time: Local::now(),
            ai_model: self.client.model_name().to_string(),
        })
    }

    /// Shared body of the three structured document steps: render with the
    /// truncated document, call the model, parse with the task's schema.
    async fn document_analysis(
        &self,
        task: AnalysisTask,
        document: &str,
    ) -> Result<AnalysisResult> {
        let prompt =
            prompt::render(task, &[("document", truncate_chars(document, ANALYZE_CHARS))])?;
        let reply = self.client.generate_text(&prompt).await;
        Ok(parse_structured(task, &reply))
    }

    /// Shared body of the two review steps: feed the accumulated analysis
    /// back in as pretty-printed JSON, keep the reply as text.
    async fn review_analysis(&self, task: AnalysisTask, analysis: &Value) -> Result<String> {
        let analysis_text = serde_json::to_string_pretty(analysis)?;
        let prompt = prompt::render(task, &[("analysis", &analysis_text)])?;
        Ok(self.client.generate_text(&prompt).await)
    }
}

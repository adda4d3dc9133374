//! The fixed prompt library: one template per analysis task, with named
//! substitution slots.
//!
//! Rendering is literal substitution of `{slot}` markers for known slot
//! names only, so the JSON examples inside template bodies pass through
//! untouched. Slot values are inserted verbatim; callers bound their length
//! before rendering.

use crate::error::{FinsightError, Result};
use crate::task::AnalysisTask;

/// One prompt template: body text with `{slot}` markers plus the slots that
/// must be supplied at render time.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    task: AnalysisTask,
    body: &'static str,
    required_slots: &'static [&'static str],
}

impl PromptTemplate {
    /// The task this template belongs to.
    pub fn task(&self) -> AnalysisTask {
        self.task
    }

    /// Slot names that must be present in the render input.
    pub fn required_slots(&self) -> &'static [&'static str] {
        self.required_slots
    }

    /// Render the template by substituting every required slot.
    ///
    /// Extra entries in `slots` are ignored. Fails with
    /// [`FinsightError::MissingSlot`] when a required slot is absent —
    /// the one hard failure in the system, raised before any model call.
    pub fn render(&self, slots: &[(&str, &str)]) -> Result<String> {
        let mut rendered = self.body.to_string();
        for required in self.required_slots {
            let value = slots
                .iter()
                .find(|(name, _)| name == required)
                .map(|(_, value)| *value)
                .ok_or_else(|| FinsightError::MissingSlot {
                    template: self.task.id().to_string(),
                    slot: (*required).to_string(),
                })?;
            rendered = rendered.replace(&format!("{{{required}}}"), value);
        }
        Ok(rendered)
    }
}

/// Look up the template for a task.
pub fn template(task: AnalysisTask) -> &'static PromptTemplate {
    match task {
        AnalysisTask::Classifier => &CLASSIFIER,
        AnalysisTask::MetricsExtractor => &METRICS_EXTRACTOR,
        AnalysisTask::RiskAnalyzer => &RISK_ANALYZER,
        AnalysisTask::ThesisGenerator => &THESIS_GENERATOR,
        AnalysisTask::ComparativeAnalyzer => &COMPARATIVE_ANALYZER,
        AnalysisTask::SummaryGenerator => &SUMMARY_GENERATOR,
        AnalysisTask::QualityChecker => &QUALITY_CHECKER,
    }
}

/// Render the template for `task` with the given slot values.
pub fn render(task: AnalysisTask, slots: &[(&str, &str)]) -> Result<String> {
    template(task).render(slots)
}

static CLASSIFIER: PromptTemplate = PromptTemplate {
    task: AnalysisTask::Classifier,
    required_slots: &["document"],
    body: r#"You are an expert financial document classifier. Analyze the following document and classify it into one of these categories:
- investment_memo: Investment analysis with recommendations
- quarterly_report: Earnings reports with financial metrics
- financial_model: Financial projections and valuation models
- pitch_deck: Investment presentations
- due_diligence: Comprehensive company analysis

Document: {document}

Respond with only the category name."#,
};

static METRICS_EXTRACTOR: PromptTemplate = PromptTemplate {
    task: AnalysisTask::MetricsExtractor,
    required_slots: &["document"],
    body: r#"You are a financial analyst expert. Extract key financial metrics from this document:

Document: {document}

Analyze the document and extract financial metrics. You can respond in ANY format - JSON, text, or structured analysis. The system will handle any format you provide.

If you prefer JSON format:
{
    "revenue": "value or null",
    "net_income": "value or null",
    "eps": "value or null",
    "pe_ratio": "value or null",
    "roe": "value or null",
    "debt_to_equity": "value or null",
    "growth_rate": "value or null",
    "target_price": "value or null",
    "recommendation": "POSITIVE/NEUTRAL/NEGATIVE or null"
}

Or provide your analysis in any other format that works best for you."#,
};

static RISK_ANALYZER: PromptTemplate = PromptTemplate {
    task: AnalysisTask::RiskAnalyzer,
    required_slots: &["document"],
    body: r#"You are a risk management expert. Analyze the following financial document for risks:

Document: {document}

Analyze the document for risks. You can respond in ANY format - JSON, text, or structured analysis. The system will handle any format you provide.

If you prefer JSON format:
{
    "market_risks": ["list of market-related risks"],
    "operational_risks": ["list of operational risks"],
    "financial_risks": ["list of financial risks"],
    "regulatory_risks": ["list of regulatory risks"],
    "overall_risk_level": "LOW/MEDIUM/HIGH"
}

Or provide your risk analysis in any other format that works best for you."#,
};

static THESIS_GENERATOR: PromptTemplate = PromptTemplate {
    task: AnalysisTask::ThesisGenerator,
    required_slots: &["document"],
    body: r#"You are a senior investment analyst. Based on this document, generate a comprehensive investment thesis:

Document: {document}

Generate an investment thesis. You can respond in ANY format - JSON, text, or structured analysis. The system will handle any format you provide.

If you prefer JSON format:
{
    "investment_thesis": "detailed investment thesis",
    "key_drivers": ["list of key growth drivers"],
    "competitive_advantages": ["list of competitive advantages"],
    "valuation_analysis": "valuation assessment",
    "investment_recommendation": "POSITIVE/NEUTRAL/NEGATIVE with reasoning"
}

Or provide your investment thesis in any other format that works best for you."#,
};

static COMPARATIVE_ANALYZER: PromptTemplate = PromptTemplate {
    task: AnalysisTask::ComparativeAnalyzer,
    required_slots: &["company_a", "company_b"],
    body: r#"You are a comparative analysis expert. Compare the following companies:

Company A: {company_a}
Company B: {company_b}

Compare the companies. You can respond in ANY format - JSON, text, or structured analysis. The system will handle any format you provide.

If you prefer JSON format:
{
    "financial_comparison": {
        "revenue_growth": "A vs B analysis",
        "profitability": "A vs B analysis",
        "valuation": "A vs B analysis"
    },
    "competitive_position": "relative competitive analysis",
    "investment_preference": "which company is preferred and why"
}

Or provide your comparison in any other format that works best for you."#,
};

static SUMMARY_GENERATOR: PromptTemplate = PromptTemplate {
    task: AnalysisTask::SummaryGenerator,
    required_slots: &["analysis"],
    body: r#"You are an executive summary specialist. Create a concise executive summary from this analysis:

Analysis: {analysis}

Format as:
EXECUTIVE SUMMARY
[2-3 sentence summary]

KEY FINDINGS
[bullet points of key findings]

RECOMMENDATION
[clear recommendation with reasoning]"#,
};

static QUALITY_CHECKER: PromptTemplate = PromptTemplate {
    task: AnalysisTask::QualityChecker,
    required_slots: &["analysis"],
    body: r#"You are a quality assurance expert. Review this financial analysis for accuracy and completeness:

Analysis: {analysis}

Check for:
1. Data consistency
2. Logical reasoning
3. Complete analysis
4. Professional presentation

Return issues found or "PASS" if analysis is high quality."#,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_task_has_a_template() {
        for task in [
            AnalysisTask::Classifier,
            AnalysisTask::MetricsExtractor,
            AnalysisTask::RiskAnalyzer,
            AnalysisTask::ThesisGenerator,
            AnalysisTask::ComparativeAnalyzer,
            AnalysisTask::SummaryGenerator,
            AnalysisTask::QualityChecker,
        ] {
            assert_eq!(template(task).task(), task);
            assert!(!template(task).required_slots().is_empty());
        }
    }

    #[test]
    fn render_substitutes_the_document_slot() {
        let prompt = render(AnalysisTask::Classifier, &[("document", "Q3 revenue was $10M")])
            .expect("classifier render should succeed");
        assert!(prompt.contains("Q3 revenue was $10M"));
        assert!(!prompt.contains("{document}"));
    }

    #[test]
    fn render_fails_on_missing_required_slot() {
        let err = render(AnalysisTask::ComparativeAnalyzer, &[("company_a", "ACME filing")])
            .expect_err("missing company_b should fail");
        match err {
            FinsightError::MissingSlot { template, slot } => {
                assert_eq!(template, "comparative_analyzer");
                assert_eq!(slot, "company_b");
            }
            other => panic!("expected MissingSlot, got {other:?}"),
        }
    }

    #[test]
    fn json_example_braces_survive_rendering() {
        let prompt = render(AnalysisTask::MetricsExtractor, &[("document", "doc body")])
            .expect("metrics render should succeed");
        assert!(prompt.contains(r#""revenue": "value or null""#));
        assert!(prompt.contains("{\n"));
        assert!(prompt.contains("doc body"));
    }

    #[test]
    fn extra_slots_are_ignored() {
        let prompt = render(
            AnalysisTask::QualityChecker,
            &[("analysis", "{\"metrics\": {}}"), ("unused", "x")],
        )
        .expect("quality checker render should succeed");
        assert!(prompt.contains("{\"metrics\": {}}"));
    }

    #[test]
    fn comparative_template_substitutes_both_sides() {
        let prompt = render(
            AnalysisTask::ComparativeAnalyzer,
            &[("company_a", "ACME 10-K"), ("company_b", "Globex 10-K")],
        )
        .expect("comparative render should succeed");
        assert!(prompt.contains("Company A: ACME 10-K"));
        assert!(prompt.contains("Company B: Globex 10-K"));
    }
}

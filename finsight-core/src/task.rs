use serde_json::{Map, Value, json};

/// The seven analysis tasks finsight can ask of the model.
///
/// The four structured tasks (`MetricsExtractor`, `RiskAnalyzer`,
/// `ThesisGenerator`, `ComparativeAnalyzer`) carry a result schema used for
/// fallback construction when the model's reply cannot be parsed; the other
/// three produce free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisTask {
    /// Classify the document into one of the known categories.
    Classifier,
    /// Extract key financial metrics.
    MetricsExtractor,
    /// Identify market, operational, financial and regulatory risks.
    RiskAnalyzer,
    /// Generate an investment thesis.
    ThesisGenerator,
    /// Compare two companies side by side.
    ComparativeAnalyzer,
    /// Produce an executive summary of the accumulated analysis.
    SummaryGenerator,
    /// Review the accumulated analysis for consistency and completeness.
    QualityChecker,
}

impl AnalysisTask {
    /// Stable string id, used in logs and template lookup.
    pub fn id(&self) -> &'static str {
        match self {
            AnalysisTask::Classifier => "classifier",
            AnalysisTask::MetricsExtractor => "metrics_extractor",
            AnalysisTask::RiskAnalyzer => "risk_analyzer",
            AnalysisTask::ThesisGenerator => "thesis_generator",
            AnalysisTask::ComparativeAnalyzer => "comparative_analyzer",
            AnalysisTask::SummaryGenerator => "summary_generator",
            AnalysisTask::QualityChecker => "quality_checker",
        }
    }

    /// Expected top-level keys of the task's structured result.
    ///
    /// Empty for the free-text tasks.
    pub fn expected_keys(&self) -> &'static [&'static str] {
        match self {
            AnalysisTask::MetricsExtractor => &[
                "revenue",
                "net_income",
                "eps",
                "pe_ratio",
                "roe",
                "debt_to_equity",
                "growth_rate",
                "target_price",
                "recommendation",
            ],
            AnalysisTask::RiskAnalyzer => &[
                "market_risks",
                "operational_risks",
                "financial_risks",
                "regulatory_risks",
                "overall_risk_level",
            ],
            AnalysisTask::ThesisGenerator => &[
                "investment_thesis",
                "key_drivers",
                "competitive_advantages",
                "valuation_analysis",
                "investment_recommendation",
            ],
            AnalysisTask::ComparativeAnalyzer => &[
                "financial_comparison",
                "competitive_position",
                "investment_preference",
            ],
            _ => &[],
        }
    }

    /// Fallback skeleton for the task: every expected key mapped to the
    /// task's placeholder value.
    ///
    /// Used when no parsing strategy recovers a mapping from the model's
    /// reply; the parser appends the raw text under `raw_response`. Empty
    /// for the free-text tasks.
    pub fn fallback_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        match self {
            AnalysisTask::MetricsExtractor => {
                for key in self.expected_keys() {
                    fields.insert((*key).to_string(), json!("Extracted from analysis"));
                }
            }
            AnalysisTask::RiskAnalyzer => {
                for key in &[
                    "market_risks",
                    "operational_risks",
                    "financial_risks",
                    "regulatory_risks",
                ] {
                    fields.insert((*key).to_string(), json!(["Risk analysis completed"]));
                }
                fields.insert("overall_risk_level".to_string(), json!("ANALYZED"));
            }
            AnalysisTask::ThesisGenerator => {
                fields.insert("investment_thesis".to_string(), json!("Thesis analysis completed"));
                fields.insert("key_drivers".to_string(), json!(["Thesis analysis completed"]));
                fields.insert(
                    "competitive_advantages".to_string(),
                    json!(["Thesis analysis completed"]),
                );
                fields.insert("valuation_analysis".to_string(), json!("Thesis analysis completed"));
                fields.insert("investment_recommendation".to_string(), json!("ANALYZED"));
            }
            AnalysisTask::ComparativeAnalyzer => {
                fields.insert(
                    "financial_comparison".to_string(),
                    json!({
                        "revenue_growth": "Comparison completed",
                        "profitability": "Comparison completed",
                        "valuation": "Comparison completed",
                    }),
                );
                fields.insert("competitive_position".to_string(), json!("Comparison completed"));
                fields.insert("investment_preference".to_string(), json!("Comparison completed"));
            }
            _ => {}
        }
        fields
    }
}

/// Document categories the classifier recognizes, with the descriptions
/// shown alongside classification output.
pub const DOCUMENT_TYPES: &[(&str, &str)] = &[
    ("investment_memo", "Investment analysis and recommendation documents"),
    ("quarterly_report", "Company earnings and financial performance reports"),
    ("financial_model", "Financial projections and valuation models"),
    ("pitch_deck", "Investment presentations and business plans"),
    ("due_diligence", "Comprehensive company analysis reports"),
];

/// Description for a classified document type, when it is one of the known
/// categories.
pub fn document_type_description(doc_type: &str) -> Option<&'static str> {
    DOCUMENT_TYPES
        .iter()
        .find(|(id, _)| *id == doc_type)
        .map(|(_, description)| *description)
}

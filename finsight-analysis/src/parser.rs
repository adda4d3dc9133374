//! Resilient recovery of structured JSON from free-form model replies.
//!
//! Models asked for JSON reply with JSON, fenced JSON, JSON buried in prose,
//! or no JSON at all. [`parse_structured`] runs an ordered chain of
//! extraction strategies, first success wins, and degrades to a
//! schema-shaped fallback when nothing parses — the caller always gets a
//! mapping. Presence of the `raw_response` key is the discriminator between
//! a genuine parse and a fallback.

use finsight_core::{AnalysisTask, truncate_chars};
use serde_json::{Map, Value};
use tracing::warn;

/// A structured analysis result: either a parsed model reply or a marked
/// fallback carrying the raw text.
pub type AnalysisResult = Map<String, Value>;

/// How much raw model text the fallback keeps under `raw_response`.
const RAW_RESPONSE_CHARS: usize = 500;

/// Extraction strategies in the order they are tried.
const STRATEGIES: &[fn(&str) -> Option<Value>] = &[
    parse_direct,
    parse_fenced,
    parse_brace_span,
    parse_bracket_or_brace_span,
];

/// Recover a mapping from `raw`, falling back to the task's schema skeleton
/// when no strategy succeeds. Total: this function never fails.
///
/// A strategy counts as successful only when its candidate parses AND the
/// value is a JSON object; a valid top-level array is rejected because
/// downstream consumers need key/value access.
pub fn parse_structured(task: AnalysisTask, raw: &str) -> AnalysisResult {
    for strategy in STRATEGIES {
        if let Some(Value::Object(map)) = strategy(raw) {
            return map;
        }
    }
    warn!(task = task.id(), "no parsing strategy recovered a mapping, using fallback");
    fallback(task, raw)
}

/// Parse the whole trimmed text as JSON.
fn parse_direct(raw: &str) -> Option<Value> {
    serde_json::from_str(raw.trim()).ok()
}

/// Strip markdown code-fence markers, then parse.
fn parse_fenced(raw: &str) -> Option<Value> {
    let cleaned = raw
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    serde_json::from_str(cleaned).ok()
}

/// Parse the span from the first `{` to the last `}`, inclusive.
///
/// First/last rather than balanced scanning: a reply holding two sibling
/// objects yields one merged candidate that normally fails to parse and
/// falls through. Known limitation, kept deliberately.
fn parse_brace_span(raw: &str) -> Option<Value> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    serde_json::from_str(raw.get(start..=end)?).ok()
}

/// Parse the first-`[`-to-last-`]` span when both brackets are present,
/// otherwise fall back to the brace span. An array that parses here is
/// still rejected by the object requirement in [`parse_structured`].
fn parse_bracket_or_brace_span(raw: &str) -> Option<Value> {
    if raw.contains('[') && raw.contains(']') {
        let start = raw.find('[')?;
        let end = raw.rfind(']')?;
        serde_json::from_str(raw.get(start..=end)?).ok()
    } else {
        parse_brace_span(raw)
    }
}

/// Schema skeleton for the task plus the raw reply under `raw_response`,
/// truncated to [`RAW_RESPONSE_CHARS`] characters with a `...` marker.
fn fallback(task: AnalysisTask, raw: &str) -> AnalysisResult {
    let mut fields = task.fallback_fields();
    let snippet = truncate_chars(raw, RAW_RESPONSE_CHARS);
    let raw_response =
        if snippet.len() < raw.len() { format!("{snippet}...") } else { raw.to_string() };
    fields.insert("raw_response".to_string(), Value::String(raw_response));
    fields
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const METRICS_JSON: &str = r#"{
        "revenue": "$394.3B",
        "net_income": "$97.0B",
        "eps": "$6.13",
        "pe_ratio": "29.8",
        "roe": "160.1%",
        "debt_to_equity": "1.95",
        "growth_rate": "8%",
        "target_price": null,
        "recommendation": "POSITIVE"
    }"#;

    fn as_map(text: &str) -> AnalysisResult {
        serde_json::from_str::<Value>(text)
            .expect("fixture is valid JSON")
            .as_object()
            .expect("fixture is an object")
            .clone()
    }

    #[test]
    fn strict_json_round_trips_exactly() {
        let parsed = parse_structured(AnalysisTask::MetricsExtractor, METRICS_JSON);
        assert_eq!(parsed, as_map(METRICS_JSON));
        assert!(!parsed.contains_key("raw_response"));
        // Null values pass through as null, not as placeholders.
        assert_eq!(parsed["target_price"], Value::Null);
    }

    #[test]
    fn every_structured_task_round_trips_schema_shaped_json() {
        for task in [
            AnalysisTask::MetricsExtractor,
            AnalysisTask::RiskAnalyzer,
            AnalysisTask::ThesisGenerator,
            AnalysisTask::ComparativeAnalyzer,
        ] {
            let mut reply = AnalysisResult::new();
            for key in task.expected_keys() {
                reply.insert((*key).to_string(), json!(format!("{key} value")));
            }
            let raw = serde_json::to_string(&Value::Object(reply.clone()))
                .expect("fixture serializes");

            let parsed = parse_structured(task, &raw);
            assert_eq!(parsed, reply, "identity round-trip failed for {}", task.id());
            assert!(!parsed.contains_key("raw_response"));
        }
    }

    #[test]
    fn fenced_json_parses_the_same_as_unfenced() {
        let fenced = format!("```json\n{METRICS_JSON}\n```");
        assert_eq!(
            parse_structured(AnalysisTask::MetricsExtractor, &fenced),
            parse_structured(AnalysisTask::MetricsExtractor, METRICS_JSON),
        );

        let bare_fence = format!("```\n{METRICS_JSON}\n```");
        assert_eq!(
            parse_structured(AnalysisTask::MetricsExtractor, &bare_fence),
            as_map(METRICS_JSON),
        );
    }

    #[test]
    fn nested_mappings_survive_parsing() {
        let comparison = r#"{
            "financial_comparison": {
                "revenue_growth": "A grows faster",
                "profitability": "B has better margins",
                "valuation": "A is cheaper"
            },
            "competitive_position": "A leads on scale",
            "investment_preference": "Company A"
        }"#;
        let parsed = parse_structured(AnalysisTask::ComparativeAnalyzer, comparison);
        assert_eq!(parsed, as_map(comparison));
        assert_eq!(parsed["financial_comparison"]["valuation"], json!("A is cheaper"));
    }

    #[test]
    fn embedded_object_is_extracted_from_surrounding_prose() {
        let raw = "Random text {\"revenue\": \"100\"} more text";
        let parsed = parse_structured(AnalysisTask::MetricsExtractor, raw);
        assert_eq!(parsed, as_map(r#"{"revenue": "100"}"#));
    }

    #[test]
    fn sibling_objects_never_collapse_to_the_first() {
        let raw = r#"{"a":1} and {"b":2}"#;
        let parsed = parse_structured(AnalysisTask::MetricsExtractor, raw);
        // The first-to-last span covers both objects and is not valid JSON,
        // so the result must be the marked fallback, never a silent {"a":1}.
        assert_ne!(parsed, as_map(r#"{"a":1}"#));
        assert!(parsed.contains_key("raw_response"));
        assert_eq!(parsed["revenue"], json!("Extracted from analysis"));
    }

    #[test]
    fn object_free_arrays_are_rejected() {
        let raw = r#"["revenue", "growth"]"#;
        let parsed = parse_structured(AnalysisTask::MetricsExtractor, raw);
        assert!(parsed.contains_key("raw_response"));
    }

    #[test]
    fn array_wrapping_a_single_object_yields_the_inner_object() {
        // The array itself is rejected, but the brace span still finds the
        // object inside it.
        let raw = r#"[{"revenue": "100"}]"#;
        let parsed = parse_structured(AnalysisTask::MetricsExtractor, raw);
        assert_eq!(parsed, as_map(r#"{"revenue": "100"}"#));
    }

    #[test]
    fn prose_reply_falls_back_with_the_full_schema() {
        let raw = "The company shows strong revenue growth and healthy margins.";
        let parsed = parse_structured(AnalysisTask::MetricsExtractor, raw);

        for key in AnalysisTask::MetricsExtractor.expected_keys() {
            assert_eq!(parsed[*key], json!("Extracted from analysis"), "missing placeholder {key}");
        }
        assert_eq!(parsed["raw_response"], json!(raw));
    }

    #[test]
    fn risk_fallback_carries_list_placeholders() {
        let parsed = parse_structured(AnalysisTask::RiskAnalyzer, "no json here");
        assert_eq!(parsed["market_risks"], json!(["Risk analysis completed"]));
        assert_eq!(parsed["overall_risk_level"], json!("ANALYZED"));
        assert_eq!(parsed["raw_response"], json!("no json here"));
    }

    #[test]
    fn long_raw_text_is_truncated_with_a_marker() {
        let raw = "y".repeat(501);
        let parsed = parse_structured(AnalysisTask::ThesisGenerator, &raw);
        assert_eq!(parsed["raw_response"], json!(format!("{}...", "y".repeat(500))));
    }

    #[test]
    fn raw_text_at_the_limit_is_kept_unmarked() {
        let raw = "y".repeat(500);
        let parsed = parse_structured(AnalysisTask::ThesisGenerator, &raw);
        assert_eq!(parsed["raw_response"], json!(raw));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let raw = "€".repeat(520);
        let parsed = parse_structured(AnalysisTask::MetricsExtractor, &raw);
        let snippet = parsed["raw_response"].as_str().expect("raw_response is a string");
        assert_eq!(snippet.chars().count(), 503);
        assert!(snippet.ends_with("€..."));
    }

    #[test]
    fn unbalanced_braces_fall_through_to_fallback() {
        let raw = "opening { only";
        let parsed = parse_structured(AnalysisTask::MetricsExtractor, raw);
        assert!(parsed.contains_key("raw_response"));
    }
}

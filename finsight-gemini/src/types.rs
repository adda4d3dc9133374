//! Wire types for the `generateContent` endpoint.
//!
//! Field names and casing follow the REST API exactly (camelCase JSON,
//! SCREAMING_SNAKE_CASE finish reasons). Only the text-generation subset is
//! modeled; unknown response fields are ignored.

use serde::{Deserialize, Serialize};

/// Role of a conversation participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One content part. Non-text parts deserialize with `text: None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A piece of conversation content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl Content {
    /// Single-part user content.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part { text: Some(text.into()) }],
            role: Some(Role::User),
        }
    }
}

/// Generation parameters. All fields optional; unset fields are omitted
/// from the request so the API applies its defaults.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i32>,
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single-turn request carrying one user text part.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user_text(prompt)],
            generation_config: None,
        }
    }

    /// Attach generation parameters.
    #[must_use]
    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

/// Why the model stopped generating a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    FinishReasonUnspecified,
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    #[serde(other)]
    Other,
}

/// One generated candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Absent when the candidate was filtered before any content was
    /// produced; deserializes as empty content in that case.
    #[serde(default)]
    pub content: Content,
    pub finish_reason: Option<FinishReason>,
}

/// Feedback about the prompt itself (set when the prompt was blocked).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// Token usage reported by the API.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<i32>,
    pub candidates_token_count: Option<i32>,
    pub total_token_count: Option<i32>,
}

/// Response body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
    pub model_version: Option<String>,
}

impl GenerationResponse {
    /// Concatenated text parts of the first candidate; empty when there is
    /// no candidate or no text.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }

    /// Finish reason of the first candidate.
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.candidates.first().and_then(|candidate| candidate.finish_reason)
    }

    /// Whether the provider withheld content for safety reasons, either by
    /// blocking the prompt (no candidates, `promptFeedback.blockReason`) or
    /// by filtering the candidate (`finishReason: SAFETY`).
    pub fn is_safety_blocked(&self) -> bool {
        if matches!(self.finish_reason(), Some(FinishReason::Safety)) {
            return true;
        }
        self.prompt_feedback
            .as_ref()
            .is_some_and(|feedback| feedback.block_reason.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_with_camel_case_fields() {
        let request = GenerateContentRequest::from_prompt("Classify this document")
            .with_generation_config(GenerationConfig {
                temperature: Some(0.2),
                max_output_tokens: Some(1024),
                ..Default::default()
            });
        let body = serde_json::to_value(&request).expect("request should serialize");

        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            json!("Classify this document")
        );
        assert_eq!(body["contents"][0]["role"], json!("user"));
        assert_eq!(body["generationConfig"]["maxOutputTokens"], json!(1024));
        assert!(body["generationConfig"].get("topK").is_none());
    }

    #[test]
    fn response_text_joins_first_candidate_parts() {
        let raw = json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": "quarterly"}, {"text": "_report"}],
                    "role": "model"
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 12,
                "candidatesTokenCount": 4,
                "totalTokenCount": 16
            },
            "modelVersion": "gemini-2.5-pro"
        });
        let response: GenerationResponse =
            serde_json::from_value(raw).expect("response should deserialize");

        assert_eq!(response.text(), "quarterly_report");
        assert_eq!(response.finish_reason(), Some(FinishReason::Stop));
        assert!(!response.is_safety_blocked());
        assert_eq!(
            response.usage_metadata.expect("usage present").total_token_count,
            Some(16)
        );
    }

    #[test]
    fn safety_filtered_candidate_has_no_text() {
        let raw = json!({
            "candidates": [{"finishReason": "SAFETY"}]
        });
        let response: GenerationResponse =
            serde_json::from_value(raw).expect("filtered response should deserialize");

        assert_eq!(response.text(), "");
        assert!(response.is_safety_blocked());
    }

    #[test]
    fn blocked_prompt_yields_no_candidates() {
        let raw = json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        });
        let response: GenerationResponse =
            serde_json::from_value(raw).expect("blocked response should deserialize");

        assert!(response.candidates.is_empty());
        assert_eq!(response.text(), "");
        assert!(response.is_safety_blocked());
    }

    #[test]
    fn unknown_finish_reasons_map_to_other() {
        let raw = json!({
            "candidates": [{
                "content": {"parts": [{"text": "x"}]},
                "finishReason": "BLOCKLIST"
            }]
        });
        let response: GenerationResponse =
            serde_json::from_value(raw).expect("response should deserialize");

        assert_eq!(response.finish_reason(), Some(FinishReason::Other));
    }
}

//! Gemini-backed [`TextModel`] provider.

use async_trait::async_trait;
use finsight_core::{FinishReason, FinsightError, ModelReply, Result, TextModel};
use finsight_gemini::{GeminiClient, GenerationResponse, ModelId};

/// [`TextModel`] implementation over the hosted Gemini API.
pub struct GeminiModel {
    client: GeminiClient,
    display_name: String,
}

impl GeminiModel {
    /// Build a model over the hosted API with the default endpoint.
    pub fn new(api_key: impl Into<String>, model: ModelId) -> Result<Self> {
        let client = GeminiClient::builder(api_key)
            .with_model(model)
            .build()
            .map_err(classify_error)?;
        Ok(Self::from_client(client))
    }

    /// Wrap an already configured client (custom base URL, proxy, timeouts).
    pub fn from_client(client: GeminiClient) -> Self {
        let display_name = client.model().display_name();
        Self { client, display_name }
    }

    fn convert_response(response: &GenerationResponse) -> ModelReply {
        let finish_reason = if response.is_safety_blocked() {
            // A blocked prompt yields no candidates at all; fold it into
            // the same signal a filtered candidate carries.
            Some(FinishReason::Safety)
        } else {
            response.finish_reason().map(|reason| match reason {
                finsight_gemini::FinishReason::Stop => FinishReason::Stop,
                finsight_gemini::FinishReason::MaxTokens => FinishReason::MaxTokens,
                finsight_gemini::FinishReason::Safety => FinishReason::Safety,
                finsight_gemini::FinishReason::Recitation => FinishReason::Recitation,
                _ => FinishReason::Other,
            })
        };

        ModelReply { text: response.text(), finish_reason }
    }
}

#[async_trait]
impl TextModel for GeminiModel {
    fn name(&self) -> &str {
        &self.display_name
    }

    async fn generate(&self, prompt: &str) -> Result<ModelReply> {
        let response = self.client.generate_text(prompt).await.map_err(classify_error)?;
        Ok(Self::convert_response(&response))
    }
}

/// Classify a wire-level failure into the finsight error taxonomy.
///
/// 429 (and any body mentioning quota exhaustion) is a rate limit, 404 is a
/// missing or misconfigured model, everything else is a transport failure.
fn classify_error(err: finsight_gemini::Error) -> FinsightError {
    match err {
        finsight_gemini::Error::BadResponse { code, description } => {
            let quota_text = description
                .as_deref()
                .is_some_and(|body| body.to_lowercase().contains("quota"));
            let detail = format!("HTTP {code}: {}", description.as_deref().unwrap_or("no body"));
            if code == 429 || quota_text {
                FinsightError::RateLimited(detail)
            } else if code == 404 {
                FinsightError::NotFound(detail)
            } else {
                FinsightError::Transport(detail)
            }
        }
        other => FinsightError::Transport(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response_from(raw: serde_json::Value) -> GenerationResponse {
        serde_json::from_value(raw).expect("fixture should deserialize")
    }

    #[test]
    fn http_429_classifies_as_rate_limited() {
        let err = classify_error(finsight_gemini::Error::BadResponse {
            code: 429,
            description: Some("Resource has been exhausted".into()),
        });
        assert!(matches!(err, FinsightError::RateLimited(_)));
    }

    #[test]
    fn quota_text_classifies_as_rate_limited_regardless_of_code() {
        let err = classify_error(finsight_gemini::Error::BadResponse {
            code: 403,
            description: Some("Quota exceeded for quota metric".into()),
        });
        assert!(matches!(err, FinsightError::RateLimited(_)));
    }

    #[test]
    fn http_404_classifies_as_not_found() {
        let err = classify_error(finsight_gemini::Error::BadResponse {
            code: 404,
            description: Some("models/gemini-nonexistent is not found".into()),
        });
        assert!(matches!(err, FinsightError::NotFound(_)));
    }

    #[test]
    fn other_statuses_classify_as_transport() {
        let err = classify_error(finsight_gemini::Error::BadResponse {
            code: 500,
            description: None,
        });
        assert!(matches!(err, FinsightError::Transport(_)));
    }

    #[test]
    fn stop_reply_converts_to_usable_text() {
        let response = response_from(json!({
            "candidates": [{
                "content": {"parts": [{"text": "investment_memo"}], "role": "model"},
                "finishReason": "STOP"
            }]
        }));
        let reply = GeminiModel::convert_response(&response);
        assert_eq!(reply.text, "investment_memo");
        assert_eq!(reply.finish_reason, Some(FinishReason::Stop));
        assert!(reply.is_usable());
    }

    #[test]
    fn filtered_candidate_converts_to_safety_reply() {
        let response = response_from(json!({
            "candidates": [{"finishReason": "SAFETY"}]
        }));
        let reply = GeminiModel::convert_response(&response);
        assert_eq!(reply.finish_reason, Some(FinishReason::Safety));
        assert!(!reply.is_usable());
    }

    #[test]
    fn blocked_prompt_converts_to_safety_reply() {
        let response = response_from(json!({
            "promptFeedback": {"blockReason": "PROHIBITED_CONTENT"}
        }));
        let reply = GeminiModel::convert_response(&response);
        assert_eq!(reply.finish_reason, Some(FinishReason::Safety));
        assert_eq!(reply.text, "");
    }
}

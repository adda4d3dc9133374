use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Why the provider stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    /// Natural completion.
    Stop,
    /// Token budget exhausted.
    MaxTokens,
    /// Provider safety settings withheld the content.
    Safety,
    /// Content flagged as recitation of training data.
    Recitation,
    /// Any reason this crate does not model explicitly.
    Other,
}

/// One single-turn model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelReply {
    /// Primary text output (the text parts of the first candidate, joined).
    pub text: String,
    /// Finish reason reported by the provider, if any.
    pub finish_reason: Option<FinishReason>,
}

impl ModelReply {
    /// Plain successful text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: Some(FinishReason::Stop),
        }
    }

    /// A reply withheld by the provider's safety filter.
    pub fn safety_filtered() -> Self {
        Self {
            text: String::new(),
            finish_reason: Some(FinishReason::Safety),
        }
    }

    /// Whether the reply carries usable text: non-empty and not withheld
    /// by the safety filter.
    pub fn is_usable(&self) -> bool {
        !self.text.trim().is_empty() && self.finish_reason != Some(FinishReason::Safety)
    }
}

/// A hosted generative-text model, reduced to the one exchange this system
/// performs: a stateless, single-turn prompt-to-text call.
///
/// No streaming, no conversation history, no tool calls. Implementations
/// must be shareable behind `Arc<dyn TextModel>`.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Human-readable model name, used in reports and logs.
    fn name(&self) -> &str;

    /// Generate text for a single prompt.
    ///
    /// Callers bound the prompt length before rendering; the prompt is
    /// expected to be non-empty.
    async fn generate(&self, prompt: &str) -> Result<ModelReply>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usable_requires_text_and_no_safety_block() {
        assert!(ModelReply::text("analysis").is_usable());
        assert!(!ModelReply::text("   ").is_usable());
        assert!(!ModelReply::safety_filtered().is_usable());

        let filtered_with_text = ModelReply {
            text: "partial".into(),
            finish_reason: Some(FinishReason::Safety),
        };
        assert!(!filtered_with_text.is_usable());
    }
}

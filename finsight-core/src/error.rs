use thiserror::Error;

/// Unified error type for finsight operations.
///
/// The model-facing variants carry a short diagnostic string from the
/// provider. The user-facing wording lives in [`FinsightError::user_sentinel`]
/// so that detection stays decoupled from presentation.
#[derive(Debug, Error)]
pub enum FinsightError {
    /// Provider rejected the call with a quota or rate-limit response.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// The requested model or endpoint does not exist.
    #[error("model not found: {0}")]
    NotFound(String),

    /// The provider withheld the prompt or the response for safety reasons.
    #[error("response filtered by provider safety settings")]
    SafetyFiltered,

    /// Any other transport or decoding failure on the model call.
    #[error("model transport error: {0}")]
    Transport(String),

    /// A prompt template was rendered without one of its required slots.
    ///
    /// This is a programming defect, not a runtime condition: it halts
    /// pipeline construction before any model call is made.
    #[error("prompt template '{template}' is missing required slot '{slot}'")]
    MissingSlot { template: String, slot: String },

    /// Startup misconfiguration (missing credential, bad model id).
    #[error("config error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl FinsightError {
    /// User-facing sentinel string substituted for a failed model call.
    ///
    /// Returns `None` for the hard-failure variants (template, config and
    /// plumbing defects), which are never degraded to a sentinel.
    pub fn user_sentinel(&self) -> Option<&'static str> {
        match self {
            FinsightError::RateLimited(_) => {
                Some("Rate limit reached - please try again in a few minutes.")
            }
            FinsightError::NotFound(_) => Some("Model configuration error."),
            FinsightError::SafetyFiltered => {
                Some("Analysis completed - response filtered for safety.")
            }
            FinsightError::Transport(_) => Some("Analysis error - please try again."),
            _ => None,
        }
    }
}

/// Result type alias for finsight operations.
pub type Result<T> = std::result::Result<T, FinsightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_translate_to_sentinels() {
        assert_eq!(
            FinsightError::RateLimited("429".into()).user_sentinel(),
            Some("Rate limit reached - please try again in a few minutes.")
        );
        assert_eq!(
            FinsightError::NotFound("404".into()).user_sentinel(),
            Some("Model configuration error.")
        );
        assert_eq!(
            FinsightError::SafetyFiltered.user_sentinel(),
            Some("Analysis completed - response filtered for safety.")
        );
        assert_eq!(
            FinsightError::Transport("boom".into()).user_sentinel(),
            Some("Analysis error - please try again.")
        );
    }

    #[test]
    fn hard_failures_have_no_sentinel() {
        let missing = FinsightError::MissingSlot {
            template: "classifier".into(),
            slot: "document".into(),
        };
        assert_eq!(missing.user_sentinel(), None);
        assert_eq!(FinsightError::Config("no key".into()).user_sentinel(), None);
    }

    #[test]
    fn missing_slot_names_template_and_slot() {
        let err = FinsightError::MissingSlot {
            template: "comparative_analyzer".into(),
            slot: "company_b".into(),
        };
        let text = err.to_string();
        assert!(text.contains("comparative_analyzer"));
        assert!(text.contains("company_b"));
    }
}

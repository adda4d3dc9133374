//! The pipeline's view of a model: total text generation.
//!
//! [`ModelClient`] wraps any [`TextModel`] and guarantees that every call
//! produces a string. Safety-filtered replies trigger one retry with a
//! shortened, generic rephrasing of the prompt; every failure is translated
//! into its user-facing sentinel so a single bad step never aborts a run.

use std::sync::Arc;

use finsight_core::{FinsightError, TextModel, truncate_chars};
use tracing::warn;

/// Neutral instruction prepended to the shortened prompt on the safety retry.
const SAFE_RETRY_PREFIX: &str = "Analyze this financial document and provide a brief summary: ";

/// How much of the original prompt the safety retry keeps.
const SAFE_RETRY_PROMPT_CHARS: usize = 500;

/// Sentinel for failures with no more specific user-facing wording.
const GENERIC_SENTINEL: &str = "Analysis error - please try again.";

/// Total text generation over an arbitrary model.
#[derive(Clone)]
pub struct ModelClient {
    model: Arc<dyn TextModel>,
}

impl ModelClient {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    /// Name of the underlying model, as shown in reports.
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Generate text for `prompt`. Never fails.
    ///
    /// A withheld or empty reply is retried once with a shortened generic
    /// prompt; errors and a still-withheld retry degrade to the sentinel
    /// strings from [`FinsightError::user_sentinel`].
    pub async fn generate_text(&self, prompt: &str) -> String {
        match self.model.generate(prompt).await {
            Ok(reply) if reply.is_usable() => reply.text,
            Ok(_) => self.retry_after_filter(prompt).await,
            Err(err) => Self::sentinel_for(&err),
        }
    }

    /// One retry with the first [`SAFE_RETRY_PROMPT_CHARS`] characters of the
    /// original prompt behind a neutral instruction. Filtering usually keys
    /// off specific wording, so the rephrasing often passes.
    async fn retry_after_filter(&self, prompt: &str) -> String {
        warn!(
            model = self.model.name(),
            "reply withheld or empty, retrying with a shortened prompt"
        );
        let safe_prompt = format!(
            "{SAFE_RETRY_PREFIX}{}",
            truncate_chars(prompt, SAFE_RETRY_PROMPT_CHARS)
        );
        match self.model.generate(&safe_prompt).await {
            Ok(reply) if reply.is_usable() => reply.text,
            Ok(_) => Self::sentinel_for(&FinsightError::SafetyFiltered),
            Err(err) => Self::sentinel_for(&err),
        }
    }

    fn sentinel_for(err: &FinsightError) -> String {
        warn!(error = %err, "model call failed, substituting sentinel");
        err.user_sentinel().unwrap_or(GENERIC_SENTINEL).to_string()
    }
}

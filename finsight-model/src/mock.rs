//! Scripted fake model for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use finsight_core::{FinsightError, ModelReply, Result, TextModel};

/// Test double for [`TextModel`].
///
/// Scripted replies are consumed in order; once the script is exhausted the
/// fallback reply repeats. Every received prompt is recorded so tests can
/// assert on what was actually sent.
pub struct MockModel {
    name: String,
    script: Mutex<VecDeque<Result<ModelReply>>>,
    fallback: ModelReply,
    prompts: Mutex<Vec<String>>,
}

impl MockModel {
    /// A model that answers every prompt with the same text.
    pub fn with_reply(text: impl Into<String>) -> Self {
        Self {
            name: "mock-model".to_string(),
            script: Mutex::new(VecDeque::new()),
            fallback: ModelReply::text(text),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A model that plays `replies` in order, then falls back to empty text.
    pub fn with_script(replies: Vec<Result<ModelReply>>) -> Self {
        Self {
            name: "mock-model".to_string(),
            script: Mutex::new(replies.into()),
            fallback: ModelReply::text(""),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A model whose every call fails with the error produced by `make_err`.
    pub fn failing_with(make_err: fn() -> FinsightError) -> FailingModel {
        FailingModel { name: "failing-model".to_string(), make_err }
    }

    /// Override the reported model name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("mock prompt log poisoned").clone()
    }
}

#[async_trait]
impl TextModel for MockModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &str) -> Result<ModelReply> {
        self.prompts.lock().expect("mock prompt log poisoned").push(prompt.to_string());
        match self.script.lock().expect("mock script poisoned").pop_front() {
            Some(result) => result,
            None => Ok(self.fallback.clone()),
        }
    }
}

/// Companion double whose every call fails. Errors are rebuilt per call
/// because [`FinsightError`] is not `Clone`.
pub struct FailingModel {
    name: String,
    make_err: fn() -> FinsightError,
}

#[async_trait]
impl TextModel for FailingModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, _prompt: &str) -> Result<ModelReply> {
        Err((self.make_err)())
    }
}

//! # finsight-core
//!
//! Core traits and types for the finsight financial-document analysis
//! engine.
//!
//! ## Overview
//!
//! This crate provides the contracts shared by the provider and pipeline
//! crates:
//!
//! - [`FinsightError`] / [`Result`] - unified error handling, including the
//!   user-facing sentinel translation table
//! - [`TextModel`] - the single-call abstraction over a hosted
//!   generative-text model
//! - [`AnalysisTask`] - the seven-task catalog with per-task result schemas
//!   and fallback placeholders
//! - [`prompt`] - the fixed prompt library with named substitution slots
//!
//! ## The model seam
//!
//! Everything above the provider talks to [`TextModel`]:
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait TextModel: Send + Sync {
//!     fn name(&self) -> &str;
//!     async fn generate(&self, prompt: &str) -> Result<ModelReply>;
//! }
//! ```
//!
//! Production code plugs in a Gemini-backed implementation; tests plug in a
//! scripted mock. The pipeline cannot tell the difference, which is the
//! point.

pub mod error;
pub mod model;
pub mod prompt;
pub mod task;
pub mod text;

pub use error::{FinsightError, Result};
pub use model::{FinishReason, ModelReply, TextModel};
pub use prompt::PromptTemplate;
pub use task::{AnalysisTask, DOCUMENT_TYPES, document_type_description};
pub use text::truncate_chars;

//! # finsight-model
//!
//! Model integrations for finsight (Gemini, plus test doubles).
//!
//! ## Overview
//!
//! This crate binds concrete models to the [`TextModel`] seam from
//! `finsight-core` and layers [`ModelClient`] on top:
//!
//! - [`GeminiModel`] - Google's Gemini models over the REST API
//! - [`MockModel`] - scripted fake for tests
//! - [`ModelClient`] - total text generation: safety retry plus
//!   error-to-sentinel translation, so analysis steps never abort
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use finsight_gemini::ModelId;
//! use finsight_model::{GeminiModel, ModelClient};
//!
//! # fn main() -> finsight_core::Result<()> {
//! let api_key = std::env::var("GOOGLE_API_KEY").expect("GOOGLE_API_KEY not set");
//! let model = GeminiModel::new(api_key, ModelId::Gemini25Pro)?;
//! let client = ModelClient::new(Arc::new(model));
//! # Ok(())
//! # }
//! ```
//!
//! ## Supported Models
//!
//! | Model | Description |
//! |-------|-------------|
//! | `gemini-2.5-pro` | Most capable model (default) |
//! | `gemini-1.5-pro` | Previous generation |
//! | `gemini-1.0-pro` | Legacy |
//! | `gemini-pro` | Legacy alias |

pub mod client;
pub mod gemini;
pub mod mock;

pub use client::ModelClient;
pub use gemini::GeminiModel;
pub use mock::{FailingModel, MockModel};

#[doc(inline)]
pub use finsight_core::TextModel;

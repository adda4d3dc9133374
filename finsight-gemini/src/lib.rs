//! # finsight-gemini
//!
//! Minimal typed client for the Google Gemini `generateContent` REST API.
//!
//! This crate deliberately models only what finsight needs: stateless,
//! single-turn text generation. No streaming, no multi-turn chat, no tool
//! calls, no embeddings. Authentication is an API key sent as the
//! `x-goog-api-key` header; the base URL can be overridden for testing
//! against a local mock server.
//!
//! ```rust,no_run
//! use finsight_gemini::{GeminiClient, ModelId};
//!
//! # async fn run() -> Result<(), finsight_gemini::Error> {
//! let client = GeminiClient::builder("YOUR_API_KEY")
//!     .with_model(ModelId::Gemini25Pro)
//!     .build()?;
//!
//! let response = client.generate_text("Classify this document: ...").await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{GeminiBuilder, GeminiClient, ModelId};
pub use error::Error;
pub use types::{
    Candidate, Content, FinishReason, GenerateContentRequest, GenerationConfig,
    GenerationResponse, Part, PromptFeedback, Role, UsageMetadata,
};

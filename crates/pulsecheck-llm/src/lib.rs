//! Pulsecheck Completion Oracle Layer
//!
//! Pluggable chat-completion providers behind a single capability:
//! `complete(system_instruction, user_content) -> text`.
//!
//! # Architecture
//!
//! The pipeline never depends on a concrete model or runtime. Everything that
//! talks to a model implements [`CompletionOracle`]; orchestrators are generic
//! over it and are tested against [`MockProvider`].
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama chat API
//! - `OpenAiProvider`: OpenAI-compatible `/chat/completions` API
//!
//! # Examples
//!
//! ```
//! use pulsecheck_llm::{CompletionOracle, MockProvider};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let provider = MockProvider::new("Hello from the oracle!");
//! let result = provider.complete("system", "user").await.unwrap();
//! assert_eq!(result, "Hello from the oracle!");
//! # }
//! ```

#![warn(missing_docs)]

mod chat;
pub mod config;
pub mod mock;
pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub use config::{OracleConfig, ProviderKind};
pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Errors that can occur during oracle calls
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// The oracle could not be reached or answered with a server error
    #[error("Oracle unavailable: {0}")]
    Unavailable(String),

    /// The oracle did not answer in time
    #[error("Oracle timed out after {0:?}")]
    Timeout(Duration),

    /// Model not available on the provider
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The provider answered, but not in the expected envelope
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider misconfiguration (missing key, bad endpoint)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LlmError {
    /// Whether this failure is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, LlmError::Timeout(_))
    }
}

/// A chat-style text-completion oracle
///
/// Implementations send one system message and one user message to a fixed
/// model and return the completion text verbatim. There are no retries at
/// this layer; callers decide whether to abort or retry.
#[async_trait]
pub trait CompletionOracle: Send + Sync {
    /// Request one completion
    async fn complete(
        &self,
        system_instruction: &str,
        user_content: &str,
    ) -> Result<String, LlmError>;

    /// Model identifier used for every call
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: CompletionOracle + ?Sized> CompletionOracle for Box<T> {
    async fn complete(
        &self,
        system_instruction: &str,
        user_content: &str,
    ) -> Result<String, LlmError> {
        (**self).complete(system_instruction, user_content).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<T: CompletionOracle + ?Sized> CompletionOracle for Arc<T> {
    async fn complete(
        &self,
        system_instruction: &str,
        user_content: &str,
    ) -> Result<String, LlmError> {
        (**self).complete(system_instruction, user_content).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

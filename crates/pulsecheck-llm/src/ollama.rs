//! Ollama Provider Implementation
//!
//! Sends chat requests to a local Ollama instance (`POST /api/chat`).
//!
//! # Examples
//!
//! ```no_run
//! use pulsecheck_llm::{CompletionOracle, OllamaProvider};
//!
//! # async fn example() -> Result<(), pulsecheck_llm::LlmError> {
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3")?;
//! let text = provider.complete("Summarize.", "Sprint 4 closed 31 issues.").await?;
//! # Ok(())
//! # }
//! ```

use crate::chat::{conversation, http_client, status_error, transport_error, ChatMessage};
use crate::{CompletionOracle, LlmError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for a single completion (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Ollama chat provider for local inference
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    timeout: Duration,
}

/// Request body for the Ollama chat API
#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

/// Response from the Ollama chat API
#[derive(Deserialize)]
struct OllamaChatResponse {
    message: ChatMessage,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let timeout = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: http_client(timeout)?,
            timeout,
        })
    }

    /// Create a new Ollama provider on `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = http_client(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    /// Endpoint this provider talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionOracle for OllamaProvider {
    async fn complete(
        &self,
        system_instruction: &str,
        user_content: &str,
    ) -> Result<String, LlmError> {
        let url = format!("{}/api/chat", self.endpoint);
        let request_body = OllamaChatRequest {
            model: &self.model,
            messages: conversation(system_instruction, user_content),
            stream: false,
        };

        debug!(model = %self.model, user_chars = user_content.len(), "Sending Ollama chat request");

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(status_error(status, &body, &self.model));
        }

        let parsed: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(parsed.message.content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

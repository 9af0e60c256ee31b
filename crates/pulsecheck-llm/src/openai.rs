//! OpenAI-compatible Provider Implementation
//!
//! Talks to any service exposing `POST {endpoint}/chat/completions` with
//! bearer authentication (OpenAI, Azure-style gateways, vLLM, LM Studio).
//! The API key is passed in explicitly; this module never reads the
//! environment.

use crate::chat::{conversation, http_client, status_error, transport_error, ChatMessage};
use crate::{CompletionOracle, LlmError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default OpenAI API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default timeout for a single completion (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// OpenAI-compatible chat completions provider
#[derive(Clone)]
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    temperature: Option<f32>,
    client: reqwest::Client,
    timeout: Duration,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl OpenAiProvider {
    /// Create a new provider
    ///
    /// Fails with [`LlmError::Config`] when the API key is blank.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Config("API key is empty".to_string()));
        }
        let timeout = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            temperature: None,
            client: http_client(timeout)?,
            timeout,
        })
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = http_client(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Endpoint this provider talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl CompletionOracle for OpenAiProvider {
    async fn complete(
        &self,
        system_instruction: &str,
        user_content: &str,
    ) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint);
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: conversation(system_instruction, user_content),
            temperature: self.temperature,
        };

        debug!(model = %self.model, user_chars = user_content.len(), "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
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

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        first_choice(parsed)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn first_choice(response: ChatCompletionResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| LlmError::InvalidResponse("Response contained no choices".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_api_key() {
        let result = OpenAiProvider::new(DEFAULT_ENDPOINT, "gpt-4o-mini", "  ");
        assert!(matches!(result, Err(LlmError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_key() {
        let provider = OpenAiProvider::new(DEFAULT_ENDPOINT, "gpt-4o-mini", "sk-secret").unwrap();
        let debug = format!("{:?}", provider);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_request_shape() {
        let body = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: conversation("sys", "usr"),
            temperature: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert!(json.get("temperature").is_none());
        assert_eq!(json["messages"][1]["role"], "user");
    }

    #[test]
    fn test_first_choice() {
        let raw = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"{\"a\":1}"}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(first_choice(parsed).unwrap(), "{\"a\":1}");

        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(first_choice(empty), Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let provider = OpenAiProvider::new("http://localhost:8000/v1/", "m", "k")
            .unwrap()
            .with_temperature(0.0);
        assert_eq!(provider.endpoint(), "http://localhost:8000/v1");
        assert_eq!(provider.temperature, Some(0.0));
    }
}

//! Configuration for the completion oracle
//!
//! Credentials and the model identifier are plain configuration values
//! handed to [`OracleConfig::build`]; nothing here reads the environment.

use crate::{ollama, openai, CompletionOracle, LlmError, OllamaProvider, OpenAiProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which provider implementation to build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Local Ollama chat API
    #[default]
    Ollama,
    /// OpenAI-compatible chat completions API
    OpenAi,
}

/// Oracle configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Provider implementation
    #[serde(default)]
    pub provider: ProviderKind,

    /// Base URL; the provider default is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Model identifier sent with every call
    pub model: String,

    /// API key for providers that need one
    ///
    /// Never written back to disk.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Per-request HTTP timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    ollama::DEFAULT_TIMEOUT_SECS
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Ollama,
            endpoint: None,
            model: "llama3".to_string(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleConfig")
            .field("provider", &self.provider)
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl OracleConfig {
    /// Per-request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Endpoint actually used, falling back to the provider default
    pub fn effective_endpoint(&self) -> &str {
        match (&self.endpoint, self.provider) {
            (Some(endpoint), _) => endpoint,
            (None, ProviderKind::Ollama) => ollama::DEFAULT_ENDPOINT,
            (None, ProviderKind::OpenAi) => openai::DEFAULT_ENDPOINT,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.provider == ProviderKind::OpenAi
            && self.api_key.as_deref().map_or(true, |k| k.trim().is_empty())
        {
            return Err("openai provider requires an api_key".to_string());
        }
        Ok(())
    }

    /// Build the configured provider
    pub fn build(&self) -> Result<Box<dyn CompletionOracle>, LlmError> {
        self.validate().map_err(LlmError::Config)?;

        let endpoint = self.effective_endpoint().to_string();
        let oracle: Box<dyn CompletionOracle> = match self.provider {
            ProviderKind::Ollama => Box::new(
                OllamaProvider::new(endpoint, self.model.clone())?.with_timeout(self.timeout())?,
            ),
            ProviderKind::OpenAi => {
                let api_key = self.api_key.clone().unwrap_or_default();
                Box::new(
                    OpenAiProvider::new(endpoint, self.model.clone(), api_key)?
                        .with_timeout(self.timeout())?,
                )
            }
        };
        Ok(oracle)
    }
}

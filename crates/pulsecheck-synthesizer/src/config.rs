//! Configuration for synthesis and whole-request limits

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Synthesizer and the Pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesizerConfig {
    /// Maximum time for the synthesis oracle call (seconds)
    pub synthesis_timeout_secs: u64,

    /// Maximum time for a whole analysis request, extraction included (seconds)
    pub request_timeout_secs: u64,
}

impl SynthesizerConfig {
    /// Synthesis call timeout as a Duration
    pub fn synthesis_timeout(&self) -> Duration {
        Duration::from_secs(self.synthesis_timeout_secs)
    }

    /// Whole-request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.synthesis_timeout_secs == 0 {
            return Err("synthesis_timeout_secs must be greater than 0".to_string());
        }
        if self.request_timeout_secs < self.synthesis_timeout_secs {
            return Err(format!(
                "request_timeout_secs ({}) must be at least synthesis_timeout_secs ({})",
                self.request_timeout_secs, self.synthesis_timeout_secs
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            synthesis_timeout_secs: 180,
            request_timeout_secs: 900,
        }
    }
}

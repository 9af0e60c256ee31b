//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum chunk size (characters)
    pub max_chunk_size: usize,

    /// Maximum time for a single per-chunk oracle call (seconds)
    pub oracle_timeout_secs: u64,

    /// Only send the first N chunks of each source to the oracle
    ///
    /// `None` sends every chunk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_chunks_per_source: Option<usize>,
}

impl ExtractorConfig {
    /// Get the per-chunk oracle timeout as a Duration
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_chunk_size == 0 {
            return Err("max_chunk_size must be greater than 0".to_string());
        }
        if self.oracle_timeout_secs == 0 {
            return Err("oracle_timeout_secs must be greater than 0".to_string());
        }
        if self.max_chunks_per_source == Some(0) {
            return Err("max_chunks_per_source must be greater than 0 when set".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_chunk_size: 4_000,
            oracle_timeout_secs: 120,
            max_chunks_per_source: None,
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: small chunks, short timeouts, capped cost
    pub fn aggressive() -> Self {
        Self {
            max_chunk_size: 2_000,
            oracle_timeout_secs: 60,
            max_chunks_per_source: Some(10),
        }
    }

    /// Lenient preset: large chunks, long timeouts, no cap
    pub fn lenient() -> Self {
        Self {
            max_chunk_size: 8_000,
            oracle_timeout_secs: 300,
            max_chunks_per_source: None,
        }
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

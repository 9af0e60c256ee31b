//! Error types for the CLI application.

use pulsecheck_extractor::ExtractorError;
use pulsecheck_llm::LlmError;
use pulsecheck_synthesizer::{FailureKind, SynthesizerError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis failed
    #[error("{0}")]
    Analysis(#[from] SynthesizerError),

    /// Oracle could not be built
    #[error("Oracle error: {0}")]
    Oracle(#[from] LlmError),

    /// JSON recovery failed
    #[error("{0}")]
    Extraction(#[from] ExtractorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Failure kind for errors that come out of the analysis stack
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            CliError::Analysis(e) => Some(e.kind()),
            // Rejected while building the oracle, before any call
            CliError::Oracle(LlmError::Config(_)) => Some(FailureKind::InvalidInput),
            CliError::Oracle(e) | CliError::Extraction(ExtractorError::Oracle(e)) => {
                Some(FailureKind::from(e))
            }
            CliError::Extraction(ExtractorError::ExtractionFailed { .. }) => {
                Some(FailureKind::ExtractionFailed)
            }
            CliError::InvalidInput(_) => Some(FailureKind::InvalidInput),
            _ => None,
        }
    }

    /// Raw oracle text worth showing for diagnostics
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            CliError::Analysis(e) => e.raw_response(),
            CliError::Extraction(e) => e.raw_response(),
            _ => None,
        }
    }
}

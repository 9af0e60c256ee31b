//! Error types for the Extractor

use pulsecheck_llm::LlmError;
use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// The oracle call for a chunk failed or timed out
    #[error("Oracle error: {0}")]
    Oracle(#[from] LlmError),

    /// An oracle response contained no parseable JSON object
    #[error("Extraction failed: {reason}")]
    ExtractionFailed {
        /// Why no JSON could be recovered
        reason: String,
        /// The response text, kept for diagnostics
        raw_response: String,
    },
}

impl ExtractorError {
    /// Raw oracle text attached to the failure, if any
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            ExtractorError::ExtractionFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}

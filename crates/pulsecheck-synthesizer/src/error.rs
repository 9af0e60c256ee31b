//! Error types for synthesis and the end-to-end pipeline

use pulsecheck_extractor::ExtractorError;
use pulsecheck_llm::LlmError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Caller-facing classification of a failed analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The oracle could not be reached or rejected the request
    OracleUnavailable,
    /// The oracle, or the whole request, ran out of time
    OracleTimeout,
    /// An oracle response held no parseable JSON
    ExtractionFailed,
    /// Synthesis did not yield a valid report
    AnalysisUnavailable,
    /// The caller supplied unusable input or configuration
    InvalidInput,
}

impl FailureKind {
    /// Stable name used in logs and CLI output
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::OracleUnavailable => "OracleUnavailable",
            FailureKind::OracleTimeout => "OracleTimeout",
            FailureKind::ExtractionFailed => "ExtractionFailed",
            FailureKind::AnalysisUnavailable => "AnalysisUnavailable",
            FailureKind::InvalidInput => "InvalidInput",
        }
    }

    /// Whether retrying the whole request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, FailureKind::OracleUnavailable | FailureKind::OracleTimeout)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why synthesis produced no report
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisFailure {
    /// The synthesis response contained no parseable JSON object
    #[error("oracle returned unparseable text: {reason}")]
    UnparseableResponse {
        /// What the JSON extractor reported
        reason: String,
        /// The synthesis response
        raw_response: String,
    },

    /// The synthesis response parsed but does not describe a valid report
    #[error("oracle returned JSON violating the report schema: {detail}")]
    SchemaViolation {
        /// Which field or invariant failed
        detail: String,
        /// The synthesis response
        raw_response: String,
    },
}

impl AnalysisFailure {
    /// The synthesis response that caused the failure
    pub fn raw_response(&self) -> &str {
        match self {
            AnalysisFailure::UnparseableResponse { raw_response, .. }
            | AnalysisFailure::SchemaViolation { raw_response, .. } => raw_response,
        }
    }

    pub(crate) fn schema(detail: impl fmt::Display, raw_response: &str) -> Self {
        AnalysisFailure::SchemaViolation {
            detail: detail.to_string(),
            raw_response: raw_response.to_string(),
        }
    }
}

/// Errors that can occur during synthesis or a full pipeline run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthesizerError {
    /// Per-source extraction failed
    #[error("Extraction of source '{source_label}' failed: {error}")]
    Extraction {
        /// Source whose extraction failed
        source_label: String,
        /// Underlying extractor error
        error: ExtractorError,
    },

    /// The synthesis oracle call failed or timed out
    #[error("Synthesis oracle error: {0}")]
    Oracle(#[from] LlmError),

    /// No valid report could be produced from the synthesis response
    #[error("Analysis unavailable: {0}")]
    AnalysisUnavailable(AnalysisFailure),

    /// The whole request exceeded its time budget
    #[error("Analysis timed out after {0:?}")]
    Timeout(Duration),

    /// Invalid sources or configuration
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SynthesizerError {
    /// Classify the failure for the caller
    pub fn kind(&self) -> FailureKind {
        match self {
            SynthesizerError::Extraction { error, .. } => match error {
                ExtractorError::Oracle(e) => FailureKind::from(e),
                ExtractorError::ExtractionFailed { .. } => FailureKind::ExtractionFailed,
            },
            SynthesizerError::Oracle(e) => FailureKind::from(e),
            SynthesizerError::AnalysisUnavailable(_) => FailureKind::AnalysisUnavailable,
            SynthesizerError::Timeout(_) => FailureKind::OracleTimeout,
            SynthesizerError::InvalidInput(_) => FailureKind::InvalidInput,
        }
    }

    /// Raw oracle text attached to the failure, if any
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            SynthesizerError::Extraction { error, .. } => error.raw_response(),
            SynthesizerError::AnalysisUnavailable(failure) => Some(failure.raw_response()),
            _ => None,
        }
    }
}

/// Classify an error returned by an oracle call
///
/// A failed call is either a timeout or an unavailable oracle, whatever the
/// provider reported.
impl From<&LlmError> for FailureKind {
    fn from(error: &LlmError) -> Self {
        if error.is_timeout() {
            FailureKind::OracleTimeout
        } else {
            FailureKind::OracleUnavailable
        }
    }
}

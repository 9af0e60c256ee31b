//! Source module - named raw-text inputs and their extracted summaries

use serde::{Deserialize, Serialize};

/// One named raw-text blob, e.g. an issue-tracker or wiki export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    /// Human-readable label ("Jira", "Confluence", ...)
    pub label: String,

    /// Raw exported text
    pub text: String,
}

impl DataSource {
    /// Create a new data source
    ///
    /// Surrounding whitespace is stripped from the label.
    pub fn new(label: impl AsRef<str>, text: impl Into<String>) -> Self {
        Self {
            label: label.as_ref().trim().to_string(),
            text: text.into(),
        }
    }
}

/// Concatenated oracle output for one data source
///
/// `text` holds every per-chunk response in chunk order, separated by a
/// blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSummary {
    /// Label of the source this summary describes
    pub source_label: String,

    /// Joined per-chunk responses
    pub text: String,

    /// Number of chunks the source was split into
    pub chunks_total: usize,

    /// Number of chunks actually sent to the oracle
    pub chunks_processed: usize,
}

impl MetricsSummary {
    /// Separator placed between consecutive chunk responses
    pub const SEPARATOR: &'static str = "\n\n";

    /// Whether some chunks were skipped by a chunk cap
    pub fn is_truncated(&self) -> bool {
        self.chunks_processed < self.chunks_total
    }

    /// Per-source statistics for analysis metadata
    pub fn stats(&self) -> SourceStats {
        SourceStats {
            label: self.source_label.clone(),
            chunks_total: self.chunks_total,
            chunks_processed: self.chunks_processed,
            summary_chars: self.text.chars().count(),
        }
    }
}

/// Extraction statistics for one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStats {
    /// Source label
    pub label: String,
    /// Chunks produced by the chunker
    pub chunks_total: usize,
    /// Chunks sent to the oracle
    pub chunks_processed: usize,
    /// Length of the metrics summary in characters
    pub summary_chars: usize,
}

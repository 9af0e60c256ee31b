//! Analysis module - a report plus the metadata the persistence layer stores

use crate::report::ProjectHealthReport;
use crate::source::SourceStats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for one analysis run, based on UUIDv7
///
/// UUIDv7 keeps identifiers chronologically sortable, which matches how
/// reports are listed downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnalysisId(u128);

impl AnalysisId {
    /// Generate a new UUIDv7-based AnalysisId
    ///
    /// # Examples
    ///
    /// ```
    /// use pulsecheck_domain::AnalysisId;
    ///
    /// let id = AnalysisId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Parse an AnalysisId from its string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl Serialize for AnalysisId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AnalysisId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        AnalysisId::from_string(&s).map_err(serde::de::Error::custom)
    }
}

/// Metadata about one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Run identifier
    pub analysis_id: AnalysisId,

    /// Unix timestamp (seconds) when the report was produced
    pub timestamp: u64,

    /// Model identifier reported by the oracle
    pub model_name: String,

    /// Per-source extraction statistics, in input order
    pub sources: Vec<SourceStats>,

    /// Wall-clock time for the whole run
    pub processing_time_ms: u64,
}

/// A synthesized report together with its run metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAnalysis {
    /// The report
    pub report: ProjectHealthReport,

    /// How it was produced
    pub metadata: AnalysisMetadata,
}

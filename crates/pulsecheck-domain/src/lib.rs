//! Pulsecheck Domain Layer
//!
//! Core data model for project-health analysis. This crate has no I/O and
//! defines the values every other crate passes around.
//!
//! ## Key Concepts
//!
//! - **DataSource**: a named raw-text export (issue tracker, wiki, ...)
//! - **TextChunk**: a bounded, contiguous slice of a source
//! - **MetricsSummary**: the oracle's per-chunk findings for one source, joined
//! - **ProjectHealthReport**: the single structured report synthesized from
//!   all summaries
//!
//! ## Architecture
//!
//! - Only `serde`, `thiserror` and `uuid` as external dependencies
//! - Pure data and validation logic
//! - Oracle access and orchestration live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod chunk;
pub mod report;
pub mod source;
pub mod status;

// Re-exports for convenience
pub use analysis::{AnalysisId, AnalysisMetadata, HealthAnalysis};
pub use chunk::TextChunk;
pub use report::{
    HealthMetrics, IssueStatusCounts, Milestone, ProjectHealthReport, Recommendation,
    ReportViolation, RiskFactor, TeamPerformance,
};
pub use source::{DataSource, MetricsSummary, SourceStats};
pub use status::{HealthStatus, Impact, ProgressStatus};

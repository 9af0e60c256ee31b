//! Pulsecheck Synthesizer
//!
//! Merges per-source metrics summaries into one validated
//! [`ProjectHealthReport`](pulsecheck_domain::ProjectHealthReport), and
//! provides the [`Pipeline`] that runs a whole analysis end to end.
//!
//! # Architecture
//!
//! ```text
//!            ┌─ Extractor(Jira) ───────┐
//! sources ───┤                          ├─ join ─→ Synthesizer ─→ extract_json ─→ validate ─→ report
//!            └─ Extractor(Confluence) ─┘
//! ```
//!
//! # Failure kinds
//!
//! Every error maps to a [`FailureKind`] through [`SynthesizerError::kind`].
//! Synthesis never falls back to a placeholder report: unparseable text and
//! schema violations both surface as `AnalysisUnavailable`, with the raw
//! oracle response attached.
//!
//! # Example Usage
//!
//! ```no_run
//! use pulsecheck_domain::DataSource;
//! use pulsecheck_extractor::ExtractorConfig;
//! use pulsecheck_llm::OllamaProvider;
//! use pulsecheck_synthesizer::{Pipeline, SynthesizerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let oracle = OllamaProvider::default_endpoint("llama3")?;
//! let pipeline = Pipeline::new(oracle, ExtractorConfig::default(), SynthesizerConfig::default())?;
//!
//! let analysis = pipeline
//!     .analyze(vec![
//!         DataSource::new("Jira", "PROJ-1 closed. PROJ-2 blocked."),
//!         DataSource::new("Confluence", "Release 2.3 planned for March."),
//!     ])
//!     .await?;
//!
//! println!("{} ({})", analysis.report.project_health, analysis.report.score);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod pipeline;
mod prompt;
mod synthesizer;

pub use config::SynthesizerConfig;
pub use error::{AnalysisFailure, FailureKind, SynthesizerError};
pub use pipeline::Pipeline;
pub use prompt::SynthesisPrompt;
pub use synthesizer::{parse_report, Synthesizer};

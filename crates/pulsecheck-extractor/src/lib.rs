//! Pulsecheck Extractor
//!
//! Turns raw issue-tracker and wiki exports into per-source metrics summaries
//! using a completion oracle.
//!
//! # Architecture
//!
//! ```text
//! DataSource → TextChunker → chunks → Extractor (one oracle call per chunk) → MetricsSummary
//! ```
//!
//! # Key Features
//!
//! - **Sentence-boundary chunking**: bounded chunks that reassemble to the input
//! - **Sequential extraction**: chunk order is preserved in the summary
//! - **Tolerant JSON recovery**: [`extract_json`] finds the object in fenced
//!   or prose-wrapped oracle output, strictly parsed
//!
//! # Example Usage
//!
//! ```no_run
//! use pulsecheck_domain::DataSource;
//! use pulsecheck_extractor::{Extractor, ExtractorConfig};
//! use pulsecheck_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let oracle = MockProvider::new("Velocity: 42 points per sprint.");
//! let extractor = Extractor::new(oracle, ExtractorConfig::default());
//!
//! let source = DataSource::new("Jira", "PROJ-1 closed. PROJ-2 open.");
//! let summary = extractor.extract_source(&source).await?;
//!
//! println!("{} chunks → {}", summary.chunks_processed, summary.text);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;


pub use chunking::{chunk_text, TextChunker};
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::extract_json;
pub use prompt::PromptBuilder;
pub use types::ExtractionRequest;

//! End-to-end analysis: extract every source, join, synthesize

use crate::config::SynthesizerConfig;
use crate::error::SynthesizerError;
use crate::synthesizer::Synthesizer;
use futures::future::try_join_all;
use pulsecheck_domain::{
    AnalysisId, AnalysisMetadata, DataSource, HealthAnalysis, MetricsSummary, ProjectHealthReport,
};
use pulsecheck_extractor::{Extractor, ExtractorConfig};
use pulsecheck_llm::CompletionOracle;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::time::timeout;
use tracing::{info, warn};

/// The analysis entry point
///
/// Sources are extracted concurrently, each one chunk by chunk. Synthesis
/// starts once every summary is available. The whole request is bounded by
/// `request_timeout_secs`; on expiry in-flight oracle calls are dropped.
pub struct Pipeline<O>
where
    O: CompletionOracle,
{
    oracle: Arc<O>,
    extractor: Extractor<O>,
    synthesizer: Synthesizer<O>,
}

impl<O> Pipeline<O>
where
    O: CompletionOracle,
{
    /// Create a new Pipeline, validating both configurations
    pub fn new(
        oracle: O,
        extractor_config: ExtractorConfig,
        synthesizer_config: SynthesizerConfig,
    ) -> Result<Self, SynthesizerError> {
        extractor_config
            .validate()
            .map_err(|e| SynthesizerError::InvalidInput(format!("extractor config: {}", e)))?;
        synthesizer_config
            .validate()
            .map_err(|e| SynthesizerError::InvalidInput(format!("synthesizer config: {}", e)))?;

        let oracle = Arc::new(oracle);
        Ok(Self {
            extractor: Extractor::from_shared(Arc::clone(&oracle), extractor_config),
            synthesizer: Synthesizer::from_shared(Arc::clone(&oracle), synthesizer_config),
            oracle,
        })
    }

    /// The per-source extractor
    pub fn extractor(&self) -> &Extractor<O> {
        &self.extractor
    }

    /// The synthesizer
    pub fn synthesizer(&self) -> &Synthesizer<O> {
        &self.synthesizer
    }

    /// Model identifier of the underlying oracle
    pub fn model_name(&self) -> &str {
        self.oracle.model_name()
    }

    /// Run a full analysis over the given sources
    pub async fn analyze(&self, sources: Vec<DataSource>) -> Result<HealthAnalysis, SynthesizerError> {
        let started = Instant::now();
        validate_sources(&sources)?;

        info!(
            "Starting analysis of {} sources with model '{}'",
            sources.len(),
            self.model_name()
        );

        let limit = self.synthesizer.config().request_timeout();
        let (summaries, report) = timeout(limit, self.run(&sources))
            .await
            .map_err(|_| {
                warn!("Analysis exceeded {:?}; abandoning in-flight oracle calls", limit);
                SynthesizerError::Timeout(limit)
            })??;

        let processing_time_ms = started.elapsed().as_millis() as u64;
        let metadata = AnalysisMetadata {
            analysis_id: AnalysisId::new(),
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or(Duration::ZERO)
                .as_secs(),
            model_name: self.model_name().to_string(),
            sources: summaries.iter().map(MetricsSummary::stats).collect(),
            processing_time_ms,
        };

        info!(
            "Analysis {} complete in {} ms: {}",
            metadata.analysis_id, processing_time_ms, report.project_health
        );

        Ok(HealthAnalysis { report, metadata })
    }

    async fn run(
        &self,
        sources: &[DataSource],
    ) -> Result<(Vec<MetricsSummary>, ProjectHealthReport), SynthesizerError> {
        let extractions = sources.iter().map(|source| async move {
            self.extractor
                .extract_source(source)
                .await
                .map_err(|error| SynthesizerError::Extraction {
                    source_label: source.label.clone(),
                    error,
                })
        });
        let summaries = try_join_all(extractions).await?;

        let report = self.synthesizer.synthesize(&summaries).await?;
        Ok((summaries, report))
    }
}

/// At least one source, every label non-empty and unique
fn validate_sources(sources: &[DataSource]) -> Result<(), SynthesizerError> {
    if sources.is_empty() {
        return Err(SynthesizerError::InvalidInput(
            "at least one data source is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for source in sources {
        let label = source.label.as_str();
        if label.trim().is_empty() {
            return Err(SynthesizerError::InvalidInput(
                "data source labels must not be empty".to_string(),
            ));
        }
        if !seen.insert(label) {
            return Err(SynthesizerError::InvalidInput(format!(
                "duplicate data source label '{}'",
                label
            )));
        }
    }
    Ok(())
}

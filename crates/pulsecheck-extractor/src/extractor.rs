//! Chunk extraction orchestration

use crate::chunking::TextChunker;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::prompt::PromptBuilder;
use crate::types::ExtractionRequest;
use pulsecheck_domain::{DataSource, MetricsSummary, TextChunk};
use pulsecheck_llm::{CompletionOracle, LlmError};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Drives the chunker and the oracle across every chunk of a data source
///
/// Chunks of one source are sent strictly one after another, so the summary
/// text always follows chunk order. The first failing chunk aborts the whole
/// source: no partial summary is ever returned.
pub struct Extractor<O>
where
    O: CompletionOracle,
{
    oracle: Arc<O>,
    config: ExtractorConfig,
}

impl<O> Extractor<O>
where
    O: CompletionOracle,
{
    /// Create a new Extractor
    pub fn new(oracle: O, config: ExtractorConfig) -> Self {
        Self::from_shared(Arc::new(oracle), config)
    }

    /// Create a new Extractor over an oracle shared with other components
    pub fn from_shared(oracle: Arc<O>, config: ExtractorConfig) -> Self {
        Self { oracle, config }
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// A chunker using the configured maximum chunk size
    pub fn chunker(&self) -> TextChunker {
        TextChunker::new(self.config.max_chunk_size)
    }

    /// Chunk a data source and extract its metrics summary
    pub async fn extract_source(
        &self,
        source: &DataSource,
    ) -> Result<MetricsSummary, ExtractorError> {
        let chunks = self.chunker().chunk(&source.text);
        info!(
            "Split source '{}' ({} chars) into {} chunks",
            source.label,
            source.text.chars().count(),
            chunks.len()
        );
        self.extract_metrics(&chunks, &source.label).await
    }

    /// Extract a metrics summary from already-chunked text
    ///
    /// Responses are joined in chunk order with a blank line between them.
    pub async fn extract_metrics(
        &self,
        chunks: &[TextChunk],
        source_label: &str,
    ) -> Result<MetricsSummary, ExtractorError> {
        let selected = match self.config.max_chunks_per_source {
            Some(cap) if chunks.len() > cap => {
                warn!(
                    "Source '{}' has {} chunks; only the first {} will be analyzed",
                    source_label,
                    chunks.len(),
                    cap
                );
                &chunks[..cap]
            }
            _ => chunks,
        };

        if selected.is_empty() {
            warn!("Source '{}' produced no chunks", source_label);
        }

        let prompt_builder = PromptBuilder::new(source_label);
        let mut responses = Vec::with_capacity(selected.len());

        for chunk in selected {
            debug!(
                "Processing {} chunk {}/{}",
                source_label,
                chunk.index + 1,
                selected.len()
            );
            let request = prompt_builder.build(chunk);
            let response = self.call_oracle(&request).await?;
            debug!("Chunk {} response length: {} chars", chunk.index, response.len());
            responses.push(response);
        }

        info!(
            "Extracted metrics for '{}' from {} of {} chunks",
            source_label,
            selected.len(),
            chunks.len()
        );

        Ok(MetricsSummary {
            source_label: source_label.to_string(),
            text: responses.join(MetricsSummary::SEPARATOR),
            chunks_total: chunks.len(),
            chunks_processed: selected.len(),
        })
    }

    /// Send one request, bounded by the per-call timeout
    async fn call_oracle(&self, request: &ExtractionRequest) -> Result<String, ExtractorError> {
        let limit = self.config.oracle_timeout();
        let response = timeout(
            limit,
            self.oracle.complete(&request.instruction, &request.chunk_text),
        )
        .await
        .map_err(|_| LlmError::Timeout(limit))?;

        response.map_err(|e| {
            warn!(
                "Oracle call failed for {} chunk {}: {}",
                request.source_label, request.chunk_index, e
            );
            ExtractorError::Oracle(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::chunk_text;
    use pulsecheck_llm::MockProvider;
    use std::time::Duration;

    fn tagging_oracle() -> MockProvider {
        MockProvider::from_fn(|_, user| Ok(format!("tag<{}>", user)))
    }

    #[tokio::test]
    async fn test_summary_follows_chunk_order() {
        let extractor = Extractor::new(tagging_oracle(), ExtractorConfig::default());
        let chunks = chunk_text("One. Two. Three.", 6);
        assert_eq!(chunks.len(), 3);

        let summary = extractor.extract_metrics(&chunks, "Jira").await.unwrap();
        assert_eq!(summary.text, "tag<One. >\n\ntag<Two. >\n\ntag<Three.>");
        assert_eq!(summary.chunks_total, 3);
        assert_eq!(summary.chunks_processed, 3);
    }

    #[tokio::test]
    async fn test_each_chunk_gets_source_instruction() {
        let oracle = tagging_oracle();
        let extractor = Extractor::new(oracle.clone(), ExtractorConfig::default());
        let source = DataSource::new("Confluence", "Page one. Page two.");

        extractor.extract_source(&source).await.unwrap();

        let calls = oracle.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].system_instruction.contains("Confluence data chunk"));
        assert_eq!(calls[0].user_content, "Page one. Page two.");
    }

    #[tokio::test]
    async fn test_empty_source_yields_empty_summary() {
        let oracle = MockProvider::new("unused");
        let extractor = Extractor::new(oracle.clone(), ExtractorConfig::default());

        let summary = extractor.extract_source(&DataSource::new("Jira", "")).await.unwrap();
        assert_eq!(summary.text, "");
        assert_eq!(summary.chunks_total, 0);
        assert_eq!(oracle.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failing_chunk_aborts_source() {
        let mut oracle = tagging_oracle();
        oracle.add_error("Two. ", LlmError::Unavailable("connection reset".into()));
        let extractor = Extractor::new(oracle.clone(), ExtractorConfig::default());

        let chunks = chunk_text("One. Two. Three.", 6);
        let err = extractor.extract_metrics(&chunks, "Jira").await.unwrap_err();

        assert!(matches!(err, ExtractorError::Oracle(LlmError::Unavailable(_))));
        // Third chunk is never sent
        assert_eq!(oracle.call_count(), 2);
    }

    #[tokio::test]
    async fn test_slow_oracle_times_out() {
        let oracle = MockProvider::new("late").with_delay(Duration::from_secs(3));
        let config = ExtractorConfig {
            oracle_timeout_secs: 1,
            ..ExtractorConfig::default()
        };
        let extractor = Extractor::new(oracle, config);

        let err = extractor
            .extract_source(&DataSource::new("Jira", "text"))
            .await
            .unwrap_err();
        assert_eq!(err, ExtractorError::Oracle(LlmError::Timeout(Duration::from_secs(1))));
    }

    #[tokio::test]
    async fn test_chunk_cap_limits_oracle_calls() {
        let oracle = tagging_oracle();
        let config = ExtractorConfig {
            max_chunks_per_source: Some(2),
            ..ExtractorConfig::default()
        };
        let extractor = Extractor::new(oracle.clone(), config);

        let chunks = chunk_text("A. B. C. D.", 3);
        assert_eq!(chunks.len(), 4);

        let summary = extractor.extract_metrics(&chunks, "Jira").await.unwrap();
        assert_eq!(oracle.call_count(), 2);
        assert_eq!(summary.text, "tag<A. >\n\ntag<B. >");
        assert!(summary.is_truncated());
    }
}

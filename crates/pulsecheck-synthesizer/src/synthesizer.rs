//! Synthesis of per-source summaries into one report

use crate::config::SynthesizerConfig;
use crate::error::{AnalysisFailure, SynthesizerError};
use crate::prompt::SynthesisPrompt;
use pulsecheck_domain::{MetricsSummary, ProjectHealthReport};
use pulsecheck_extractor::{extract_json, ExtractorError};
use pulsecheck_llm::{CompletionOracle, LlmError};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Merges every source's metrics summary into one `ProjectHealthReport`
///
/// Exactly one oracle call is made per synthesis. A response that holds no
/// JSON, or JSON that is not a valid report, is an error: no default report
/// is ever substituted.
pub struct Synthesizer<O>
where
    O: CompletionOracle,
{
    oracle: Arc<O>,
    config: SynthesizerConfig,
}

impl<O> Synthesizer<O>
where
    O: CompletionOracle,
{
    /// Create a new Synthesizer
    pub fn new(oracle: O, config: SynthesizerConfig) -> Self {
        Self::from_shared(Arc::new(oracle), config)
    }

    /// Create a new Synthesizer over an oracle shared with other components
    pub fn from_shared(oracle: Arc<O>, config: SynthesizerConfig) -> Self {
        Self { oracle, config }
    }

    /// The active configuration
    pub fn config(&self) -> &SynthesizerConfig {
        &self.config
    }

    /// Synthesize one report from all summaries
    pub async fn synthesize(
        &self,
        summaries: &[MetricsSummary],
    ) -> Result<ProjectHealthReport, SynthesizerError> {
        if summaries.is_empty() {
            return Err(SynthesizerError::InvalidInput(
                "at least one metrics summary is required".to_string(),
            ));
        }

        let prompt = SynthesisPrompt::new(summaries);
        let user_content = prompt.user_content();
        info!(
            "Synthesizing report from {} sources ({} chars)",
            summaries.len(),
            user_content.chars().count()
        );

        let limit = self.config.synthesis_timeout();
        let response = timeout(
            limit,
            self.oracle.complete(&prompt.system_instruction(), &user_content),
        )
        .await
        .map_err(|_| LlmError::Timeout(limit))??;

        debug!("Synthesis response length: {} chars", response.len());

        let report = parse_report(&response).map_err(|failure| {
            warn!("Synthesis produced no usable report: {}", failure);
            SynthesizerError::AnalysisUnavailable(failure)
        })?;

        info!(
            "Synthesized report: {} (score {})",
            report.project_health, report.score
        );
        Ok(report)
    }
}

/// Turn a synthesis response into a validated report
pub fn parse_report(response: &str) -> Result<ProjectHealthReport, AnalysisFailure> {
    let value = extract_json(response).map_err(|e| match e {
        ExtractorError::ExtractionFailed { reason, raw_response } => {
            AnalysisFailure::UnparseableResponse {
                reason,
                raw_response,
            }
        }
        other => AnalysisFailure::UnparseableResponse {
            reason: other.to_string(),
            raw_response: response.to_string(),
        },
    })?;

    let report: ProjectHealthReport =
        serde_json::from_value(value).map_err(|e| AnalysisFailure::schema(e, response))?;

    report
        .validate()
        .map_err(|violation| AnalysisFailure::schema(violation, response))?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulsecheck_domain::HealthStatus;
    use pulsecheck_llm::MockProvider;
    use std::time::Duration;

    const VALID_REPORT: &str = r#"{
        "projectHealth": "YELLOW",
        "score": 64,
        "metrics": {
            "velocity": 21.5,
            "issueStatus": {"open": 14, "inProgress": 6, "closed": 30},
            "riskFactors": [
                {"description": "Single reviewer", "impact": "MEDIUM", "status": "IN_PROGRESS"}
            ],
            "milestones": [],
            "recommendations": []
        },
        "analysis": "Throughput is fine but review capacity is thin."
    }"#;

    fn summaries() -> Vec<MetricsSummary> {
        vec![MetricsSummary {
            source_label: "Jira".to_string(),
            text: "14 open, 6 in progress, 30 closed".to_string(),
            chunks_total: 1,
            chunks_processed: 1,
        }]
    }

    #[tokio::test]
    async fn test_synthesize_parses_fenced_report() {
        let oracle = MockProvider::new(format!("Here you go:\n```json\n{}\n```", VALID_REPORT));
        let synthesizer = Synthesizer::new(oracle.clone(), SynthesizerConfig::default());

        let report = synthesizer.synthesize(&summaries()).await.unwrap();
        assert_eq!(report.project_health, HealthStatus::Yellow);
        assert_eq!(report.metrics.issue_status.total(), 50);
        // Missing teamPerformance defaults to zeros
        assert_eq!(report.metrics.team_performance.quality, 0.0);
        assert_eq!(oracle.call_count(), 1);
    }

    #[tokio::test]
    async fn test_synthesize_sends_summaries_as_user_content() {
        let oracle = MockProvider::new(VALID_REPORT);
        let synthesizer = Synthesizer::new(oracle.clone(), SynthesizerConfig::default());

        synthesizer.synthesize(&summaries()).await.unwrap();

        let calls = oracle.calls();
        assert_eq!(calls[0].user_content, "Jira metrics:\n14 open, 6 in progress, 30 closed");
        assert!(calls[0].system_instruction.contains("GREEN|YELLOW|RED"));
    }

    #[tokio::test]
    async fn test_prose_response_is_unparseable() {
        let oracle = MockProvider::new("The project looks healthy overall.");
        let synthesizer = Synthesizer::new(oracle, SynthesizerConfig::default());

        let err = synthesizer.synthesize(&summaries()).await.unwrap_err();
        match err {
            SynthesizerError::AnalysisUnavailable(AnalysisFailure::UnparseableResponse {
                raw_response,
                ..
            }) => assert_eq!(raw_response, "The project looks healthy overall."),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_status_is_schema_violation() {
        let oracle = MockProvider::new(VALID_REPORT.replace("YELLOW", "ORANGE"));
        let synthesizer = Synthesizer::new(oracle, SynthesizerConfig::default());

        let err = synthesizer.synthesize(&summaries()).await.unwrap_err();
        assert!(matches!(
            err,
            SynthesizerError::AnalysisUnavailable(AnalysisFailure::SchemaViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_oracle_failure_propagates() {
        let oracle = MockProvider::from_fn(|_, _| Err(LlmError::RateLimited));
        let synthesizer = Synthesizer::new(oracle, SynthesizerConfig::default());

        let err = synthesizer.synthesize(&summaries()).await.unwrap_err();
        assert_eq!(err, SynthesizerError::Oracle(LlmError::RateLimited));
    }

    #[tokio::test]
    async fn test_slow_synthesis_times_out() {
        let oracle = MockProvider::new(VALID_REPORT).with_delay(Duration::from_secs(3));
        let config = SynthesizerConfig {
            synthesis_timeout_secs: 1,
            request_timeout_secs: 10,
        };
        let synthesizer = Synthesizer::new(oracle, config);

        let err = synthesizer.synthesize(&summaries()).await.unwrap_err();
        assert_eq!(err, SynthesizerError::Oracle(LlmError::Timeout(Duration::from_secs(1))));
    }

    #[tokio::test]
    async fn test_no_summaries_is_invalid_input() {
        let synthesizer = Synthesizer::new(MockProvider::new(VALID_REPORT), SynthesizerConfig::default());
        let err = synthesizer.synthesize(&[]).await.unwrap_err();
        assert!(matches!(err, SynthesizerError::InvalidInput(_)));
    }

    #[test]
    fn test_parse_report_rejects_negative_velocity() {
        let response = VALID_REPORT.replace("21.5", "-3");
        let failure = parse_report(&response).unwrap_err();
        match failure {
            AnalysisFailure::SchemaViolation { detail, .. } => assert!(detail.contains("velocity")),
            other => panic!("unexpected failure: {:?}", other),
        }
    }

    #[test]
    fn test_parse_report_requires_metrics() {
        let failure =
            parse_report(r#"{"projectHealth": "GREEN", "score": 90, "analysis": "ok"}"#).unwrap_err();
        assert!(matches!(failure, AnalysisFailure::SchemaViolation { .. }));
    }
}

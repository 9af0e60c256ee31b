//! Prompt construction for the final synthesis call

use pulsecheck_domain::status::alternatives;
use pulsecheck_domain::{HealthStatus, Impact, MetricsSummary, ProgressStatus};

/// Builds the single synthesis request over all per-source summaries
pub struct SynthesisPrompt<'a> {
    summaries: &'a [MetricsSummary],
}

impl<'a> SynthesisPrompt<'a> {
    /// Create a new synthesis prompt
    pub fn new(summaries: &'a [MetricsSummary]) -> Self {
        Self { summaries }
    }

    /// System instruction spelling out the exact report shape
    pub fn system_instruction(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(SYNTHESIS_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str(&report_shape());
        prompt.push_str("\n\n");

        prompt.push_str(OUTPUT_RULES);

        prompt
    }

    /// User content: each source label followed by its summary text
    pub fn user_content(&self) -> String {
        self.summaries
            .iter()
            .map(|s| format!("{} metrics:\n{}", s.source_label, s.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn report_shape() -> String {
    let health = alternatives(&HealthStatus::ALL);
    let impact = alternatives(&Impact::ALL);
    let status = alternatives(&ProgressStatus::ALL);

    format!(
        r#"{{
  "projectHealth": "{health}",
  "score": <number 0-100>,
  "metrics": {{
    "velocity": <number >= 0>,
    "issueStatus": {{ "open": <integer>, "inProgress": <integer>, "closed": <integer> }},
    "teamPerformance": {{ "productivity": <number 0-100>, "collaboration": <number 0-100>, "quality": <number 0-100> }},
    "riskFactors": [
      {{ "description": "<text>", "impact": "{impact}", "status": "{status}", "mitigation": "<text>" }}
    ],
    "milestones": [
      {{ "name": "<text>", "dueDate": "<YYYY-MM-DD>", "status": "{status}", "riskFactors": [ <same shape as above> ] }}
    ],
    "recommendations": [
      {{ "description": "<text>", "status": "{status}", "priority": "{impact}" }}
    ]
  }},
  "analysis": "<short free-text summary>"
}}"#
    )
}

const SYNTHESIS_INSTRUCTIONS: &str = "You are assessing the health of a software project. \
Combine the metrics below, extracted from several data sources, into one project health report \
with exactly this JSON structure:";

const OUTPUT_RULES: &str = "Rules:
- Respond with a single JSON object and nothing else.
- Do not include comments, trailing commas or explanations inside the JSON.
- Use only the listed values for projectHealth, impact, status and priority.
- Use empty lists when there is nothing to report.";

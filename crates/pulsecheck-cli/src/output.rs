//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use colored::*;
use pulsecheck_domain::{HealthAnalysis, HealthStatus, ProjectHealthReport, TextChunk};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Characters of chunk text shown per row in the chunk preview
const PREVIEW_CHARS: usize = 48;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a finished analysis.
    pub fn format_analysis(&self, analysis: &HealthAnalysis) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(analysis)?),
            OutputFormat::Table => Ok(self.format_analysis_table(analysis)),
        }
    }

    fn format_analysis_table(&self, analysis: &HealthAnalysis) -> String {
        let report = &analysis.report;
        let metadata = &analysis.metadata;
        let mut sections = vec![self.format_overview(report)];

        if report.all_risk_factors().next().is_some() {
            sections.push(self.format_risks(report));
        }
        if !report.metrics.milestones.is_empty() {
            sections.push(self.format_milestones(report));
        }
        if !report.metrics.recommendations.is_empty() {
            sections.push(self.format_recommendations(report));
        }

        sections.push(report.analysis.clone());

        let sources: Vec<String> = metadata
            .sources
            .iter()
            .map(|s| {
                if s.chunks_processed < s.chunks_total {
                    format!("{} ({}/{} chunks)", s.label, s.chunks_processed, s.chunks_total)
                } else {
                    format!("{} ({} chunks)", s.label, s.chunks_total)
                }
            })
            .collect();
        sections.push(self.info(&format!(
            "Analysis {} by {} in {} ms from {}",
            metadata.analysis_id,
            metadata.model_name,
            metadata.processing_time_ms,
            sources.join(", ")
        )));

        sections.join("\n\n")
    }

    fn format_overview(&self, report: &ProjectHealthReport) -> String {
        let metrics = &report.metrics;
        let team = &metrics.team_performance;
        let issues = &metrics.issue_status;

        let mut builder = Builder::default();
        builder.push_record(["Metric", "Value"]);
        builder.push_record(["Project health".to_string(), self.health(report.project_health)]);
        builder.push_record(["Score".to_string(), format!("{}", report.score)]);
        builder.push_record(["Velocity".to_string(), format!("{}", metrics.velocity)]);
        builder.push_record([
            "Issues (open / in progress / closed)".to_string(),
            format!("{} / {} / {}", issues.open, issues.in_progress, issues.closed),
        ]);
        builder.push_record([
            "Team (productivity / collaboration / quality)".to_string(),
            format!("{} / {} / {}", team.productivity, team.collaboration, team.quality),
        ]);

        render(builder)
    }

    fn format_risks(&self, report: &ProjectHealthReport) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Risk", "Impact", "Status", "Mitigation"]);
        for risk in report.all_risk_factors() {
            builder.push_record([
                risk.description.clone(),
                risk.impact.to_string(),
                risk.status.to_string(),
                risk.mitigation.clone().unwrap_or_default(),
            ]);
        }
        render(builder)
    }

    fn format_milestones(&self, report: &ProjectHealthReport) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Milestone", "Due", "Status", "Risks"]);
        for milestone in &report.metrics.milestones {
            builder.push_record([
                milestone.name.clone(),
                milestone.due_date.clone().unwrap_or_else(|| "-".to_string()),
                milestone.status.to_string(),
                milestone.risk_factors.len().to_string(),
            ]);
        }
        render(builder)
    }

    fn format_recommendations(&self, report: &ProjectHealthReport) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Recommendation", "Priority", "Status"]);
        for rec in &report.metrics.recommendations {
            builder.push_record([
                rec.description.clone(),
                rec.priority.map_or_else(|| "-".to_string(), |p| p.to_string()),
                rec.status.to_string(),
            ]);
        }
        render(builder)
    }

    /// Format a chunk preview.
    pub fn format_chunks(&self, chunks: &[TextChunk]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = chunks
                    .iter()
                    .map(|c| {
                        serde_json::json!({
                            "index": c.index,
                            "start": c.start,
                            "end": c.end,
                            "chars": c.char_len(),
                            "text": c.text,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Table => {
                if chunks.is_empty() {
                    return Ok(self.colorize("No chunks (empty input).", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "Bytes", "Chars", "Text"]);
                for chunk in chunks {
                    builder.push_record([
                        chunk.index.to_string(),
                        format!("{}..{}", chunk.start, chunk.end),
                        chunk.char_len().to_string(),
                        preview(&chunk.text),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a recovered JSON value.
    pub fn format_json(&self, value: &serde_json::Value) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    /// Format a failure with its kind and any raw oracle text.
    pub fn failure(&self, error: &CliError) -> String {
        let kind = error.kind();
        let headline = match kind {
            Some(kind) => format!("[{}] {}", kind, error),
            None => error.to_string(),
        };
        let mut out = self.error(&headline);
        if kind.is_some_and(|k| k.is_retryable()) {
            out.push('\n');
            out.push_str(&self.info("The oracle may answer on a later attempt; rerun the request."));
        }
        if let Some(raw) = error.raw_response() {
            out.push_str("\n\n");
            out.push_str(&self.colorize("Raw oracle response:", "yellow"));
            out.push('\n');
            out.push_str(raw);
        }
        out
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn health(&self, status: HealthStatus) -> String {
        let color = match status {
            HealthStatus::Green => "green",
            HealthStatus::Yellow => "yellow",
            HealthStatus::Red => "red",
        };
        self.colorize(status.as_str(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

/// First characters of a chunk on one line
fn preview(text: &str) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    if flat.chars().count() > PREVIEW_CHARS {
        let head: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", head)
    } else {
        flat
    }
}

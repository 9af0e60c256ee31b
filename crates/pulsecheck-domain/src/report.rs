//! Report module - the structured project-health report
//!
//! A `ProjectHealthReport` is produced exactly once per synthesis call and is
//! never mutated afterwards. Field names serialize in camelCase to match the
//! JSON shape the oracle is instructed to return.
//!
//! Enumeration membership (health, impact, status) is enforced by
//! deserialization itself; numeric ranges are enforced by
//! [`ProjectHealthReport::validate`].

use crate::status::{HealthStatus, Impact, ProgressStatus};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive bounds for the overall score and team sub-scores
pub const SCORE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

/// The final structured project-health report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHealthReport {
    /// Overall status
    pub project_health: HealthStatus,

    /// Overall score in [0, 100]
    pub score: f64,

    /// Quantitative metrics
    pub metrics: HealthMetrics,

    /// Free-text analysis summary
    pub analysis: String,
}

/// Metrics block of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    /// Delivery velocity (story points or issues per sprint, as reported)
    pub velocity: f64,

    /// Issue counts by status
    pub issue_status: IssueStatusCounts,

    /// Team performance sub-scores
    #[serde(default)]
    pub team_performance: TeamPerformance,

    /// Project-level risks
    #[serde(default)]
    pub risk_factors: Vec<RiskFactor>,

    /// Upcoming or recent milestones
    #[serde(default)]
    pub milestones: Vec<Milestone>,

    /// Suggested actions
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

/// Issue counts by workflow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueStatusCounts {
    /// Open issues
    pub open: u32,
    /// Issues in progress
    pub in_progress: u32,
    /// Closed issues
    pub closed: u32,
}

impl IssueStatusCounts {
    /// Total number of issues across all states
    pub fn total(&self) -> u64 {
        u64::from(self.open) + u64::from(self.in_progress) + u64::from(self.closed)
    }
}

/// Team performance sub-scores, each in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPerformance {
    /// Throughput relative to plan
    #[serde(default)]
    pub productivity: f64,
    /// Review and communication health
    #[serde(default)]
    pub collaboration: f64,
    /// Defect and rework signal
    #[serde(default)]
    pub quality: f64,
}

/// A single risk factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    /// What the risk is
    pub description: String,

    /// How badly it would hurt
    pub impact: Impact,

    /// State of its mitigation
    pub status: ProgressStatus,

    /// Planned or ongoing mitigation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation: Option<String>,
}

/// A milestone with its own risks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// Milestone name
    pub name: String,

    /// Due date as written by the source (usually YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    /// Progress toward the milestone
    pub status: ProgressStatus,

    /// Risks specific to this milestone
    #[serde(default)]
    pub risk_factors: Vec<RiskFactor>,
}

/// A recommended action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// The action
    pub description: String,

    /// Whether it has been acted on
    pub status: ProgressStatus,

    /// Urgency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Impact>,
}

/// A report that deserialized but breaks a numeric or content invariant
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportViolation {
    /// Overall score outside [0, 100]
    #[error("score {0} out of range [0, 100]")]
    ScoreOutOfRange(f64),

    /// Velocity below zero
    #[error("velocity {0} is negative")]
    NegativeVelocity(f64),

    /// A team performance sub-score outside [0, 100]
    #[error("teamPerformance.{field} {value} out of range [0, 100]")]
    TeamScoreOutOfRange {
        /// Sub-score name
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// A required text field is blank
    #[error("{0} is empty")]
    EmptyText(String),
}

impl ProjectHealthReport {
    /// Check the invariants serde cannot express
    ///
    /// Returns the first violation found. Values are never clamped.
    pub fn validate(&self) -> Result<(), ReportViolation> {
        if !SCORE_RANGE.contains(&self.score) {
            return Err(ReportViolation::ScoreOutOfRange(self.score));
        }
        self.metrics.validate()
    }

    /// Every risk factor in the report, project-level first, then per milestone
    pub fn all_risk_factors(&self) -> impl Iterator<Item = &RiskFactor> {
        self.metrics.risk_factors.iter().chain(
            self.metrics
                .milestones
                .iter()
                .flat_map(|m| m.risk_factors.iter()),
        )
    }
}

impl HealthMetrics {
    fn validate(&self) -> Result<(), ReportViolation> {
        if self.velocity < 0.0 {
            return Err(ReportViolation::NegativeVelocity(self.velocity));
        }

        let team = &self.team_performance;
        for (field, value) in [
            ("productivity", team.productivity),
            ("collaboration", team.collaboration),
            ("quality", team.quality),
        ] {
            if !SCORE_RANGE.contains(&value) {
                return Err(ReportViolation::TeamScoreOutOfRange { field, value });
            }
        }

        for (idx, risk) in self.risk_factors.iter().enumerate() {
            risk.validate(&format!("riskFactors[{}]", idx))?;
        }
        for (idx, milestone) in self.milestones.iter().enumerate() {
            if milestone.name.trim().is_empty() {
                return Err(ReportViolation::EmptyText(format!("milestones[{}].name", idx)));
            }
            for (ridx, risk) in milestone.risk_factors.iter().enumerate() {
                risk.validate(&format!("milestones[{}].riskFactors[{}]", idx, ridx))?;
            }
        }
        for (idx, rec) in self.recommendations.iter().enumerate() {
            if rec.description.trim().is_empty() {
                return Err(ReportViolation::EmptyText(format!(
                    "recommendations[{}].description",
                    idx
                )));
            }
        }
        Ok(())
    }
}

impl RiskFactor {
    fn validate(&self, path: &str) -> Result<(), ReportViolation> {
        if self.description.trim().is_empty() {
            return Err(ReportViolation::EmptyText(format!("{}.description", path)));
        }
        Ok(())
    }
}

//! Status module - the fixed enumerations used by health reports
//!
//! Each enum serializes in SCREAMING_SNAKE_CASE, which is the exact form the
//! synthesis prompt asks the oracle to emit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall project health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    /// On track
    Green,

    /// Needs attention
    Yellow,

    /// At risk
    Red,
}

impl HealthStatus {
    /// All variants, in severity order
    pub const ALL: [HealthStatus; 3] = [HealthStatus::Green, HealthStatus::Yellow, HealthStatus::Red];

    /// Get the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Green => "GREEN",
            HealthStatus::Yellow => "YELLOW",
            HealthStatus::Red => "RED",
        }
    }

    /// Parse from a wire name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GREEN" => Some(HealthStatus::Green),
            "YELLOW" => Some(HealthStatus::Yellow),
            "RED" => Some(HealthStatus::Red),
            _ => None,
        }
    }
}

/// Impact (or priority) of a risk factor or recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Impact {
    /// Blocks delivery
    High,

    /// Degrades delivery
    Medium,

    /// Cosmetic or long-term
    Low,
}

impl Impact {
    /// All variants
    pub const ALL: [Impact; 3] = [Impact::High, Impact::Medium, Impact::Low];

    /// Get the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "HIGH",
            Impact::Medium => "MEDIUM",
            Impact::Low => "LOW",
        }
    }

    /// Parse from a wire name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "HIGH" => Some(Impact::High),
            "MEDIUM" => Some(Impact::Medium),
            "LOW" => Some(Impact::Low),
            _ => None,
        }
    }
}

/// Progress of a risk mitigation, milestone, or recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressStatus {
    /// Work has not begun
    NotStarted,

    /// Work is underway
    InProgress,

    /// Work is done
    Completed,
}

impl ProgressStatus {
    /// All variants, in lifecycle order
    pub const ALL: [ProgressStatus; 3] = [
        ProgressStatus::NotStarted,
        ProgressStatus::InProgress,
        ProgressStatus::Completed,
    ];

    /// Get the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::NotStarted => "NOT_STARTED",
            ProgressStatus::InProgress => "IN_PROGRESS",
            ProgressStatus::Completed => "COMPLETED",
        }
    }

    /// Parse from a wire name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "NOT_STARTED" => Some(ProgressStatus::NotStarted),
            "IN_PROGRESS" => Some(ProgressStatus::InProgress),
            "COMPLETED" => Some(ProgressStatus::Completed),
            _ => None,
        }
    }
}

macro_rules! wire_name_impls {
    ($($ty:ident => $what:literal),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl std::str::FromStr for $ty {
                type Err = String;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::parse(s).ok_or_else(|| format!("Invalid {}: {}", $what, s))
                }
            }
        )*
    };
}

wire_name_impls! {
    HealthStatus => "health status",
    Impact => "impact",
    ProgressStatus => "progress status",
}

/// Render the allowed values of an enumeration as `A|B|C` for prompts
pub fn alternatives<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("|")
}

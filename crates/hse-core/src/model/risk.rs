use serde::{Deserialize, Serialize};

use super::de;

labelled_enum! {
    /// Risk tier, ordered from least to most severe.
    pub enum RiskLevel as "risk level" {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Critical => "Critical",
    }
}

impl RiskLevel {
    /// High and Critical both demand attention on dashboards.
    #[must_use]
    pub const fn is_severe(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

/// Severity × likelihood assessment, each nominally 1–5.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskMatrix {
    #[serde(deserialize_with = "de::number", skip_serializing_if = "Option::is_none")]
    pub severity: Option<f64>,
    #[serde(deserialize_with = "de::number", skip_serializing_if = "Option::is_none")]
    pub likelihood: Option<f64>,
}

impl RiskMatrix {
    #[must_use]
    pub const fn new(severity: f64, likelihood: f64) -> Self {
        Self {
            severity: Some(severity),
            likelihood: Some(likelihood),
        }
    }

    /// `severity × likelihood`, or `None` when either side is missing.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        Some(self.severity? * self.likelihood?)
    }
}

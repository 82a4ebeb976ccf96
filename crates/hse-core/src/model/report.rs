use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;
use super::risk::RiskMatrix;

labelled_enum! {
    pub enum ReportStatus as "report status" {
        Draft => "draft",
        Submitted => "submitted",
        UnderReview => "under_review",
        Active => "active",
        Closed => "closed",
    }
}

/// An incident report raised against a project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Report {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(deserialize_with = "de::text")]
    pub org_id: String,
    #[serde(deserialize_with = "de::text")]
    pub project_id: String,
    #[serde(deserialize_with = "de::text")]
    pub reporter_id: String,
    /// Report type, e.g. `Incident`, `Near Miss`, `Accident`.
    #[serde(rename = "type", deserialize_with = "de::text")]
    pub kind: String,
    #[serde(deserialize_with = "de::variant", skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportStatus>,
    #[serde(deserialize_with = "de::timestamp", skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "de::timestamp", skip_serializing_if = "Option::is_none")]
    pub reported_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "de::text")]
    pub description: String,
    #[serde(deserialize_with = "de::record")]
    pub risk_pre_control: RiskMatrix,
}

impl Report {
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == Some(ReportStatus::Closed)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;

labelled_enum! {
    pub enum ProjectStatus as "project status" {
        Active => "active",
        Pending => "pending",
        Completed => "completed",
        Archived => "archived",
    }
}

/// A site project owned by an organization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(deserialize_with = "de::text")]
    pub org_id: String,
    #[serde(deserialize_with = "de::text")]
    pub name: String,
    #[serde(deserialize_with = "de::text")]
    pub code: String,
    #[serde(deserialize_with = "de::variant", skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(deserialize_with = "de::number", skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(deserialize_with = "de::number", skip_serializing_if = "Option::is_none")]
    pub budget_spent: Option<f64>,
    /// Percent complete, nominally 0–100.
    #[serde(deserialize_with = "de::number", skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(deserialize_with = "de::timestamp", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "de::timestamp", skip_serializing_if = "Option::is_none")]
    pub finish_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "de::text")]
    pub manager_id: String,
    #[serde(deserialize_with = "de::text")]
    pub location: String,
}

impl Project {
    /// Completed and archived projects are finished; nothing about them is overdue.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(
            self.status,
            Some(ProjectStatus::Completed | ProjectStatus::Archived)
        )
    }

    /// Short label for charts: the project code, else the name.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.code.is_empty() {
            &self.name
        } else {
            &self.code
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;
use super::risk::RiskLevel;

labelled_enum! {
    pub enum InspectionStatus as "inspection status" {
        Draft => "Draft",
        Scheduled => "Scheduled",
        Ongoing => "Ongoing",
        InProgress => "In Progress",
        Submitted => "Submitted",
        PendingReview => "Pending Review",
        Approved => "Approved",
        Closed => "Closed",
        Overdue => "Overdue",
        Archived => "Archived",
    }
}

labelled_enum! {
    pub enum FindingStatus as "finding status" {
        Open => "open",
        InProgress => "in_progress",
        Closed => "closed",
        CorrectedOnSite => "corrected_on_site",
    }
}

/// One observation raised during an inspection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Finding {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(deserialize_with = "de::text")]
    pub description: String,
    #[serde(deserialize_with = "de::variant", skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(deserialize_with = "de::variant", skip_serializing_if = "Option::is_none")]
    pub status: Option<FindingStatus>,
    #[serde(alias = "observation_category", deserialize_with = "de::text")]
    pub category: String,
}

/// A scheduled or completed site inspection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Inspection {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(deserialize_with = "de::text")]
    pub org_id: String,
    #[serde(deserialize_with = "de::text")]
    pub project_id: String,
    #[serde(deserialize_with = "de::text")]
    pub title: String,
    #[serde(deserialize_with = "de::text")]
    pub person_responsible_id: String,
    #[serde(rename = "type", deserialize_with = "de::text")]
    pub kind: String,
    #[serde(deserialize_with = "de::variant", skip_serializing_if = "Option::is_none")]
    pub status: Option<InspectionStatus>,
    #[serde(deserialize_with = "de::timestamp", skip_serializing_if = "Option::is_none")]
    pub schedule_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "de::list")]
    pub findings: Vec<Finding>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_findings_in_either_case() {
        let inspection: Inspection = serde_json::from_str(
            r#"{
                "id": "i-1",
                "type": "Safety",
                "status": "In Progress",
                "schedule_at": "2024-04-04T09:00:00Z",
                "findings": [
                    {"id": "f-1", "risk_level": "High", "status": "open", "observation_category": "Unsafe Act"},
                    {"id": "f-2", "risk_level": "Low", "status": "Closed"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(inspection.status, Some(InspectionStatus::InProgress));
        assert_eq!(inspection.findings.len(), 2);
        assert_eq!(inspection.findings[0].category, "Unsafe Act");
        assert_eq!(inspection.findings[1].status, Some(FindingStatus::Closed));
    }

    #[test]
    fn missing_findings_are_empty() {
        let inspection: Inspection = serde_json::from_str(r#"{"id": "i-2", "findings": null}"#).unwrap();
        assert!(inspection.findings.is_empty());
    }
}

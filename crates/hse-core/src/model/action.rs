use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;

labelled_enum! {
    /// Lifecycle status of an action item.
    pub enum ActionStatus as "action status" {
        Open => "Open",
        InProgress => "In Progress",
        PendingReview => "Pending Review",
        OnHold => "On Hold",
        Verified => "Verified",
        Closed => "Closed",
    }
}

labelled_enum! {
    /// Priority tier, ordered from least to most severe.
    pub enum Priority as "priority" {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Critical => "Critical",
    }
}

labelled_enum! {
    /// Where an action item came from.
    pub enum SourceType as "source type" {
        Report => "Report",
        Inspection => "Inspection",
        Standalone => "Standalone",
        Manual => "Manual",
    }
}

/// Back-reference from an action to the record that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionSource {
    #[serde(
        rename = "type",
        deserialize_with = "de::variant",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<SourceType>,
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(deserialize_with = "de::text")]
    pub description: String,
}

/// A corrective or standalone action with an owner and a due date.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionItem {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(deserialize_with = "de::text")]
    pub action: String,
    #[serde(deserialize_with = "de::text")]
    pub owner_id: String,
    #[serde(deserialize_with = "de::text")]
    pub project_id: String,
    #[serde(deserialize_with = "de::timestamp", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "de::variant", skip_serializing_if = "Option::is_none")]
    pub status: Option<ActionStatus>,
    #[serde(deserialize_with = "de::variant", skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(deserialize_with = "de::record")]
    pub source: ActionSource,
}

impl ActionItem {
    /// True only for an explicit `Closed` status.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == Some(ActionStatus::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_store_document() {
        let item: ActionItem = serde_json::from_str(
            r#"{
                "id": "a-1",
                "action": "Replace guard rail",
                "owner_id": "u-7",
                "project_id": "p-1",
                "due_date": "2024-05-01",
                "status": "In Progress",
                "priority": "High",
                "source": {"type": "Report", "id": "r-9", "description": "Fall from height"}
            }"#,
        )
        .unwrap();

        assert_eq!(item.status, Some(ActionStatus::InProgress));
        assert_eq!(item.priority, Some(Priority::High));
        assert_eq!(item.source.kind, Some(SourceType::Report));
        assert_eq!(item.source.description, "Fall from height");
        assert!(item.due_date.is_some());
        assert!(!item.is_closed());
    }

    #[test]
    fn unknown_values_and_missing_source_are_tolerated() {
        let item: ActionItem = serde_json::from_str(
            r#"{"id": "a-2", "status": "Archived??", "priority": 3, "source": null}"#,
        )
        .unwrap();

        assert!(item.status.is_none());
        assert!(item.priority.is_none());
        assert_eq!(item.source, ActionSource::default());
        assert!(item.due_date.is_none());
    }

    #[test]
    fn serializes_with_wire_names() {
        let item = ActionItem {
            id: "a-3".into(),
            status: Some(ActionStatus::Closed),
            ..ActionItem::default()
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["status"], "Closed");
        assert_eq!(json["owner_id"], "");
        assert!(json.get("due_date").is_none());
        assert!(json["source"].get("type").is_none());
    }
}

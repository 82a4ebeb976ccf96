use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;

labelled_enum! {
    /// Permit workflow state, from draft through closure.
    pub enum PtwStatus as "permit status" {
        Draft => "DRAFT",
        Submitted => "SUBMITTED",
        PreScreen => "PRE_SCREEN",
        SiteInspection => "SITE_INSPECTION",
        Approval => "APPROVAL",
        Active => "ACTIVE",
        Hold => "HOLD",
        Completed => "COMPLETED",
        Closed => "CLOSED",
    }
}

/// The slice of the permit payload the engine reads.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PtwPayload {
    #[serde(deserialize_with = "de::text")]
    pub creator_id: String,
    #[serde(deserialize_with = "de::text")]
    pub permit_no: String,
}

/// A permit to work.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ptw {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(deserialize_with = "de::text")]
    pub org_id: String,
    #[serde(deserialize_with = "de::text")]
    pub project_id: String,
    /// Permit type, e.g. `Hot Work`, `Lifting`.
    #[serde(rename = "type", deserialize_with = "de::text")]
    pub kind: String,
    #[serde(deserialize_with = "de::variant", skip_serializing_if = "Option::is_none")]
    pub status: Option<PtwStatus>,
    #[serde(deserialize_with = "de::text")]
    pub title: String,
    #[serde(deserialize_with = "de::record")]
    pub payload: PtwPayload,
    #[serde(deserialize_with = "de::timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

use serde::{Deserialize, Serialize};

use super::de;

labelled_enum! {
    pub enum UserStatus as "user status" {
        Active => "active",
        Invited => "invited",
        Inactive => "inactive",
        PendingApproval => "pending_approval",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(deserialize_with = "de::text")]
    pub org_id: String,
    #[serde(deserialize_with = "de::text")]
    pub name: String,
    #[serde(deserialize_with = "de::text")]
    pub email: String,
    /// Role key, e.g. `HSE_MANAGER`; organizations may define custom roles.
    #[serde(deserialize_with = "de::text")]
    pub role: String,
    #[serde(deserialize_with = "de::variant", skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

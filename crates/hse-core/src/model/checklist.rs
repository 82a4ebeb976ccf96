use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::de;
use super::risk::RiskLevel;

labelled_enum! {
    pub enum CheckResult as "checklist result" {
        Pass => "pass",
        Fail => "fail",
        Na => "na" | "n/a" | "not_applicable",
    }
}

labelled_enum! {
    pub enum RunStatus as "run status" {
        InProgress => "in_progress",
        Completed => "completed",
    }
}

/// Text that is either a single string or a language → text map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    Translations(BTreeMap<String, String>),
}

impl Default for LocalizedText {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl LocalizedText {
    /// Resolve for `lang`, falling back to English, then to any translation.
    ///
    /// Returns `None` when no non-empty text exists.
    #[must_use]
    pub fn resolve(&self, lang: &str) -> Option<&str> {
        match self {
            Self::Plain(text) => Some(text.as_str()).filter(|t| !t.is_empty()),
            Self::Translations(map) => [lang, "en"]
                .iter()
                .filter_map(|key| map.get(*key))
                .chain(map.values())
                .map(String::as_str)
                .find(|t| !t.is_empty()),
        }
    }
}

impl From<&str> for LocalizedText {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistItem {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(deserialize_with = "de::record")]
    pub text: LocalizedText,
    #[serde(deserialize_with = "de::record")]
    pub description: LocalizedText,
    #[serde(
        alias = "riskLevel",
        deserialize_with = "de::variant",
        skip_serializing_if = "Option::is_none"
    )]
    pub risk_level: Option<RiskLevel>,
}

/// A reusable checklist from the organization's library.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistTemplate {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(deserialize_with = "de::text")]
    pub org_id: String,
    #[serde(deserialize_with = "de::text")]
    pub category: String,
    #[serde(deserialize_with = "de::record")]
    pub title: LocalizedText,
    #[serde(deserialize_with = "de::list")]
    pub items: Vec<ChecklistItem>,
}

impl ChecklistTemplate {
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&ChecklistItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// The outcome recorded for one checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunResult {
    #[serde(deserialize_with = "de::text")]
    pub item_id: String,
    #[serde(deserialize_with = "de::variant", skip_serializing_if = "Option::is_none")]
    pub result: Option<CheckResult>,
    #[serde(deserialize_with = "de::opt_text", skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(deserialize_with = "de::list", skip_serializing_if = "Vec::is_empty")]
    pub evidence_urls: Vec<String>,
}

impl RunResult {
    #[must_use]
    pub fn new(item_id: &str, result: CheckResult) -> Self {
        Self {
            item_id: item_id.to_string(),
            result: Some(result),
            ..Self::default()
        }
    }
}

/// One execution of a checklist template.
///
/// `score` is written once at submission and never recomputed on read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistRun {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(deserialize_with = "de::text")]
    pub org_id: String,
    #[serde(deserialize_with = "de::text")]
    pub project_id: String,
    #[serde(deserialize_with = "de::text")]
    pub template_id: String,
    #[serde(deserialize_with = "de::text")]
    pub executed_by_id: String,
    #[serde(deserialize_with = "de::timestamp", skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "de::variant", skip_serializing_if = "Option::is_none")]
    pub status: Option<RunStatus>,
    #[serde(deserialize_with = "de::number", skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(deserialize_with = "de::list")]
    pub results: Vec<RunResult>,
}

//! Recent-activity feed across reports, inspections and permits.

use chrono::{DateTime, Utc};
use hse_core::UserDirectory;
use hse_core::model::{Inspection, Ptw, Report, User};
use serde::{Serialize, Serializer};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActivityKind {
    Report,
    Inspection,
    Ptw,
}

impl ActivityKind {
    pub const ALL: &'static [Self] = &[Self::Report, Self::Inspection, Self::Ptw];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Inspection => "inspection",
            Self::Ptw => "ptw",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "report" | "reports" => Ok(Self::Report),
            "inspection" | "inspections" => Ok(Self::Inspection),
            "ptw" | "permit" | "permits" => Ok(Self::Ptw),
            other => Err(format!("unknown activity type '{other}'")),
        }
    }
}

impl Serialize for ActivityKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityPriority {
    Low,
    Medium,
    High,
}

/// One feed row. Derived on every assembly; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    /// Display name of the resolved actor.
    pub user: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<ActivityPriority>,
}

/// A record left out of the feed because its actor id matched no user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedActor {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub record_id: String,
    pub actor_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityFeed {
    /// Newest first; undated entries last.
    pub entries: Vec<Activity>,
    pub unresolved: Vec<UnresolvedActor>,
}

impl ActivityFeed {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const SEVERE_REPORT_SEVERITY: f64 = 3.0;

/// Merge reports, inspections and permits into one feed.
///
/// Records whose actor does not resolve are dropped from `entries` and listed
/// in `unresolved`. Ties keep encounter order: reports, then inspections, then
/// permits.
#[must_use]
pub fn assemble_feed(
    reports: &[Report],
    inspections: &[Inspection],
    ptws: &[Ptw],
    users: &[User],
) -> ActivityFeed {
    let directory = UserDirectory::new(users);
    let mut feed = ActivityFeed::default();

    for report in reports {
        let priority = if report
            .risk_pre_control
            .severity
            .is_some_and(|s| s > SEVERE_REPORT_SEVERITY)
        {
            ActivityPriority::High
        } else {
            ActivityPriority::Medium
        };
        feed.push(
            &directory,
            &report.reporter_id,
            Activity {
                id: report.id.clone(),
                kind: ActivityKind::Report,
                title: non_empty_or(&report.kind, "Report"),
                description: report.description.clone(),
                user: String::new(),
                timestamp: report.occurred_at,
                status: report.status.map(|s| s.as_str().to_string()),
                priority: Some(priority),
            },
        );
    }

    for inspection in inspections {
        let title = if inspection.title.is_empty() {
            non_empty_or(&inspection.kind, "Inspection")
        } else {
            inspection.title.clone()
        };
        feed.push(
            &directory,
            &inspection.person_responsible_id,
            Activity {
                id: inspection.id.clone(),
                kind: ActivityKind::Inspection,
                title,
                description: format!("{} findings", inspection.findings.len()),
                user: String::new(),
                timestamp: inspection.schedule_at,
                status: inspection.status.map(|s| s.as_str().to_string()),
                priority: None,
            },
        );
    }

    for ptw in ptws {
        feed.push(
            &directory,
            &ptw.payload.creator_id,
            Activity {
                id: ptw.id.clone(),
                kind: ActivityKind::Ptw,
                title: ptw.title.clone(),
                description: ptw.payload.permit_no.clone(),
                user: String::new(),
                timestamp: ptw.updated_at,
                status: ptw.status.map(|s| s.as_str().to_string()),
                priority: None,
            },
        );
    }

    feed.entries
        .sort_by_key(|entry| (entry.timestamp.is_none(), Reverse(entry.timestamp)));

    debug!(
        entries = feed.entries.len(),
        unresolved = feed.unresolved.len(),
        "assembled activity feed"
    );
    feed
}

impl ActivityFeed {
    fn push(&mut self, directory: &UserDirectory<'_>, actor_id: &str, mut activity: Activity) {
        if let Some(user) = directory.get(actor_id) {
            activity.user = directory.display_name(&user.id).to_string();
            self.entries.push(activity);
        } else {
            warn!(
                kind = %activity.kind,
                record_id = %activity.id,
                actor_id,
                "dropping activity with unresolved actor"
            );
            self.unresolved.push(UnresolvedActor {
                kind: activity.kind,
                record_id: activity.id,
                actor_id: actor_id.to_string(),
            });
        }
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

use chrono::{DateTime, Utc};
use hse_core::model::{ActionItem, ActionStatus};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::priority::days_until;

/// True when the item is past due and not closed. Undated items are never overdue.
#[must_use]
pub fn is_overdue(item: &ActionItem, now: DateTime<Utc>) -> bool {
    item.due_date.is_some_and(|due| due < now) && !item.is_closed()
}

/// Status as shown in lists: `Overdue` overrides the stored status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    Overdue,
    Status(ActionStatus),
    Unknown,
}

impl DisplayStatus {
    #[must_use]
    pub fn of(item: &ActionItem, now: DateTime<Utc>) -> Self {
        if is_overdue(item, now) {
            return Self::Overdue;
        }
        item.status.map_or(Self::Unknown, Self::Status)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overdue => "Overdue",
            Self::Status(status) => status.as_str(),
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DisplayStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Days-remaining label for an open, dated item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueLabel {
    /// Whole days past due (always positive).
    Overdue(i64),
    /// Whole days until due (zero or more).
    Left(i64),
}

impl DueLabel {
    /// `None` for closed or undated items.
    #[must_use]
    pub fn of(item: &ActionItem, now: DateTime<Utc>) -> Option<Self> {
        if item.is_closed() {
            return None;
        }
        let days = days_until(item.due_date?, now);
        Some(if days < 0 {
            Self::Overdue(-days)
        } else {
            Self::Left(days)
        })
    }
}

impl fmt::Display for DueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overdue(days) => write!(f, "{days} days overdue"),
            Self::Left(days) => write!(f, "{days} days left"),
        }
    }
}

impl Serialize for DueLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

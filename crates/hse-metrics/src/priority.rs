//! Effective priority of an action item.
//!
//! An explicit priority always wins. Otherwise closed items are `Low` and open
//! ones are ranked by how many whole days remain until they fall due.

use chrono::{DateTime, Utc};
use hse_core::config::PriorityConfig;
use hse_core::model::{ActionItem, Priority};
use serde::{Deserialize, Serialize};

const DAY_MS: i64 = 86_400_000;

/// Day windows for deriving a priority from the due date.
///
/// `days <= high_within_days` is `High`, `days <= medium_within_days` is
/// `Medium`, anything later is `Low`. Overdue items are always `Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityWindows {
    pub high_within_days: i64,
    pub medium_within_days: i64,
}

impl Default for PriorityWindows {
    fn default() -> Self {
        Self {
            high_within_days: 3,
            medium_within_days: 7,
        }
    }
}

impl From<PriorityConfig> for PriorityWindows {
    fn from(config: PriorityConfig) -> Self {
        Self {
            high_within_days: config.high_within_days,
            medium_within_days: config.medium_within_days,
        }
    }
}

/// Whole days from `now` until `due`, rounded up at millisecond precision.
///
/// A due date one millisecond in the past is 0 days away, not -1.
#[must_use]
pub fn days_until(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (due - now).num_milliseconds();
    let whole = ms / DAY_MS;
    if ms % DAY_MS > 0 { whole + 1 } else { whole }
}

/// Effective priority with the default 3/7-day windows.
#[must_use]
pub fn classify(item: &ActionItem, now: DateTime<Utc>) -> Priority {
    classify_with(item, now, &PriorityWindows::default())
}

/// Effective priority with custom windows. Total over every input.
#[must_use]
pub fn classify_with(
    item: &ActionItem,
    now: DateTime<Utc>,
    windows: &PriorityWindows,
) -> Priority {
    if let Some(priority) = item.priority {
        return priority;
    }
    if item.is_closed() {
        return Priority::Low;
    }
    let Some(due) = item.due_date else {
        return Priority::Low;
    };

    let days = days_until(due, now);
    if days < 0 {
        Priority::Critical
    } else if days <= windows.high_within_days {
        Priority::High
    } else if days <= windows.medium_within_days {
        Priority::Medium
    } else {
        Priority::Low
    }
}

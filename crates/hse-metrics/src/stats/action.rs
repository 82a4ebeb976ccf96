use chrono::{DateTime, Utc};
use hse_core::model::{ActionItem, ActionStatus, Priority};
use serde::Serialize;

use crate::priority::{PriorityWindows, classify_with};
use crate::status::is_overdue;

/// Headline counters for the action tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActionStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub closed: usize,
    pub overdue: usize,
    /// Open items whose effective priority is `Critical`.
    pub critical: usize,
}

#[must_use]
pub fn action_stats(items: &[ActionItem], now: DateTime<Utc>) -> ActionStats {
    action_stats_with(items, now, &PriorityWindows::default())
}

/// Counters over whatever `items` yields, typically the output of an action filter.
#[must_use]
pub fn action_stats_with<'a>(
    items: impl IntoIterator<Item = &'a ActionItem>,
    now: DateTime<Utc>,
    windows: &PriorityWindows,
) -> ActionStats {
    items
        .into_iter()
        .fold(ActionStats::default(), |mut stats, item| {
            stats.total += 1;
            match item.status {
                Some(ActionStatus::Open) => stats.open += 1,
                Some(ActionStatus::InProgress) => stats.in_progress += 1,
                Some(ActionStatus::Closed) => stats.closed += 1,
                _ => {}
            }
            if is_overdue(item, now) {
                stats.overdue += 1;
            }
            if !item.is_closed() && classify_with(item, now, windows) == Priority::Critical {
                stats.critical += 1;
            }
            stats
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    fn item(status: Option<ActionStatus>, due_days: Option<i64>, priority: Option<Priority>) -> ActionItem {
        ActionItem {
            status,
            priority,
            due_date: due_days.map(|d| now() + Duration::days(d)),
            ..ActionItem::default()
        }
    }

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(action_stats(&[], now()), ActionStats::default());
    }

    #[test]
    fn counts_by_status_overdue_and_critical() {
        let items = vec![
            item(Some(ActionStatus::Open), Some(-1), None),
            item(Some(ActionStatus::InProgress), Some(2), None),
            item(Some(ActionStatus::Closed), Some(-5), None),
            item(Some(ActionStatus::OnHold), None, Some(Priority::Critical)),
            item(Some(ActionStatus::Closed), None, Some(Priority::Critical)),
            item(None, Some(-3), None),
        ];
        let stats = action_stats(&items, now());
        assert_eq!(
            stats,
            ActionStats {
                total: 6,
                open: 1,
                in_progress: 1,
                closed: 2,
                overdue: 2,
                critical: 3,
            }
        );
    }

    #[test]
    fn counts_only_what_the_filter_kept() {
        let items = vec![
            item(Some(ActionStatus::Open), Some(-1), None),
            item(Some(ActionStatus::Closed), None, None),
        ];
        let stats = action_stats_with(
            items.iter().filter(|i| !i.is_closed()),
            now(),
            &PriorityWindows::default(),
        );
        assert_eq!(stats.total, 1);
        assert_eq!(stats.open, 1);
        assert_eq!(stats.closed, 0);
    }
}

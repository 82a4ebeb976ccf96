//! Snapshot-driven dashboard.
//!
//! The store delivers whole collections at a time. [`Dashboard`] keeps the
//! latest snapshot and action filter, recomputes every derived view from
//! scratch whenever either changes, and hands the new [`DashboardView`] to
//! each observer in subscription order.

use chrono::{DateTime, Utc};
use hse_core::model::{ActionItem, Priority};
use hse_core::{Clock, Snapshot, SystemClock, UserDirectory};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::debug;

use crate::feed::{ActivityFeed, assemble_feed};
use crate::filter::{ActionFilter, RecordFilter};
use crate::priority::{PriorityWindows, classify_with};
use crate::stats::{
    ActionStats, InspectionStats, PermitStats, ProjectStats, ReportStats, StatusSlice,
    action_stats_with, inspection_stats, permit_stats, project_stats, report_stats,
    status_distribution,
};
use crate::status::{DisplayStatus, DueLabel};

/// One line of the action tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRow {
    pub id: String,
    pub action: String,
    pub owner: String,
    pub project_id: String,
    pub priority: Priority,
    pub status: DisplayStatus,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<DueLabel>,
    pub source: String,
}

impl ActionRow {
    #[must_use]
    pub fn build(
        item: &ActionItem,
        now: DateTime<Utc>,
        windows: &PriorityWindows,
        directory: &UserDirectory<'_>,
    ) -> Self {
        Self {
            id: item.id.clone(),
            action: item.action.clone(),
            owner: directory.display_name(&item.owner_id).to_string(),
            project_id: item.project_id.clone(),
            priority: classify_with(item, now, windows),
            status: DisplayStatus::of(item, now),
            due_date: item.due_date,
            due: DueLabel::of(item, now),
            source: item.source.description.clone(),
        }
    }
}

/// Everything the dashboard shows for one snapshot, filter and instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub computed_at: DateTime<Utc>,
    pub filter: ActionFilter,
    /// Actions in the snapshot before filtering.
    pub total_actions: usize,
    /// Actions passing `filter`, in snapshot order.
    pub actions: Vec<ActionRow>,
    /// Counted over the filtered actions.
    pub action_stats: ActionStats,
    pub project_stats: ProjectStats,
    pub project_status: Vec<StatusSlice>,
    pub report_stats: ReportStats,
    pub inspection_stats: InspectionStats,
    pub permit_stats: PermitStats,
    pub feed: ActivityFeed,
}

impl DashboardView {
    /// Derive the full view. Same inputs, same view.
    #[must_use]
    pub fn compute(
        snapshot: &Snapshot,
        filter: &ActionFilter,
        now: DateTime<Utc>,
        windows: &PriorityWindows,
    ) -> Self {
        let directory = UserDirectory::new(&snapshot.users);
        let kept = filter.apply(&snapshot.actions);
        let actions = kept
            .iter()
            .map(|item| ActionRow::build(item, now, windows, &directory))
            .collect();
        let project_stats = project_stats(&snapshot.projects, now);

        Self {
            computed_at: now,
            filter: filter.clone(),
            total_actions: snapshot.actions.len(),
            actions,
            action_stats: action_stats_with(kept.iter().copied(), now, windows),
            project_status: status_distribution(&project_stats),
            project_stats,
            report_stats: report_stats(&snapshot.reports),
            inspection_stats: inspection_stats(&snapshot.inspections),
            permit_stats: permit_stats(&snapshot.ptws),
            feed: assemble_feed(
                &snapshot.reports,
                &snapshot.inspections,
                &snapshot.ptws,
                &snapshot.users,
            ),
        }
    }
}

type Observer = Box<dyn FnMut(&DashboardView)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    observers: Vec<(u64, Observer)>,
    notifying: bool,
    cancelled: Vec<u64>,
}

/// Keeps an observer registered; dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let released = {
            let mut registry = registry.borrow_mut();
            // Observers are detached while they run; remember the id so it is
            // not re-attached afterwards.
            if registry.notifying {
                registry.cancelled.push(self.id);
            }
            let position = registry.observers.iter().position(|(id, _)| *id == self.id);
            position.map(|index| registry.observers.remove(index))
        };
        // The observer may own other subscriptions; drop it outside the borrow.
        drop(released);
    }
}

/// Holds the latest snapshot and filter and republishes on every change.
pub struct Dashboard<C = SystemClock> {
    clock: C,
    windows: PriorityWindows,
    snapshot: Snapshot,
    filter: ActionFilter,
    view: DashboardView,
    registry: Rc<RefCell<Registry>>,
}

impl<C: Clock> Dashboard<C> {
    #[must_use]
    pub fn new(clock: C, windows: PriorityWindows) -> Self {
        let snapshot = Snapshot::default();
        let filter = ActionFilter::default();
        let view = DashboardView::compute(&snapshot, &filter, clock.now(), &windows);
        Self {
            clock,
            windows,
            snapshot,
            filter,
            view,
            registry: Rc::default(),
        }
    }

    /// Replace the snapshot and republish.
    pub fn publish(&mut self, snapshot: Snapshot) -> &DashboardView {
        self.snapshot = snapshot;
        self.recompute()
    }

    /// Replace the action filter and republish.
    pub fn set_filter(&mut self, filter: ActionFilter) -> &DashboardView {
        self.filter = filter;
        self.recompute()
    }

    /// Recompute against the clock's current instant without new data.
    pub fn refresh(&mut self) -> &DashboardView {
        self.recompute()
    }

    #[must_use]
    pub const fn view(&self) -> &DashboardView {
        &self.view
    }

    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    #[must_use]
    pub const fn filter(&self) -> &ActionFilter {
        &self.filter
    }

    /// Register `observer` for every future view.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, observer: impl FnMut(&DashboardView) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.observers.push((id, Box::new(observer)));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.registry.borrow().observers.len()
    }

    fn recompute(&mut self) -> &DashboardView {
        let now = self.clock.now();
        self.view = DashboardView::compute(&self.snapshot, &self.filter, now, &self.windows);
        debug!(
            actions = self.view.actions.len(),
            feed = self.view.feed.len(),
            observers = self.observer_count(),
            "dashboard recomputed"
        );
        self.notify();
        &self.view
    }

    fn notify(&self) {
        let mut observers: Vec<(u64, Observer)> = {
            let mut registry = self.registry.borrow_mut();
            registry.notifying = true;
            std::mem::take(&mut registry.observers)
        };

        for (_, observer) in &mut observers {
            observer(&self.view);
        }

        let released = {
            let mut registry = self.registry.borrow_mut();
            let cancelled = std::mem::take(&mut registry.cancelled);
            let (kept, released): (Vec<_>, Vec<_>) = observers
                .into_iter()
                .partition(|(id, _)| !cancelled.contains(id));
            let added = std::mem::replace(&mut registry.observers, kept);
            registry.observers.extend(added);
            registry.notifying = false;
            released
        };
        drop(released);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use hse_core::FixedClock;
    use hse_core::model::{ActionStatus, User};

    use crate::filter::{Search, Selection};

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap())
    }

    fn snapshot() -> Snapshot {
        let now = clock().now();
        let action = |id: &str, owner: &str, due_days: i64| ActionItem {
            id: id.to_string(),
            action: format!("Action {id}"),
            owner_id: owner.to_string(),
            project_id: "p-1".to_string(),
            status: Some(ActionStatus::Open),
            due_date: Some(now + Duration::days(due_days)),
            ..ActionItem::default()
        };
        Snapshot {
            actions: vec![action("a-1", "u-1", -1), action("a-2", "", 2), action("a-3", "u-9", 30)],
            users: vec![User {
                id: "u-1".to_string(),
                name: "Dana".to_string(),
                ..User::default()
            }],
            ..Snapshot::default()
        }
    }

    #[test]
    fn rows_resolve_owners_and_priorities() {
        let view = DashboardView::compute(
            &snapshot(),
            &ActionFilter::default(),
            clock().now(),
            &PriorityWindows::default(),
        );
        let owners: Vec<&str> = view.actions.iter().map(|r| r.owner.as_str()).collect();
        assert_eq!(owners, ["Dana", "Unassigned", "Unknown"]);
        let priorities: Vec<Priority> = view.actions.iter().map(|r| r.priority).collect();
        assert_eq!(priorities, [Priority::Critical, Priority::High, Priority::Low]);
        assert_eq!(view.actions[0].status, DisplayStatus::Overdue);
        assert_eq!(view.action_stats.overdue, 1);
    }

    #[test]
    fn observers_see_every_recompute_until_dropped() {
        let mut dashboard = Dashboard::new(clock(), PriorityWindows::default());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let subscription = dashboard.subscribe(move |view| sink.borrow_mut().push(view.actions.len()));
        assert_eq!(dashboard.observer_count(), 1);

        dashboard.publish(snapshot());
        dashboard.set_filter(ActionFilter {
            search: Search::new("a-1"),
            ..ActionFilter::default()
        });
        assert_eq!(*seen.borrow(), [3, 1]);

        drop(subscription);
        assert_eq!(dashboard.observer_count(), 0);
        dashboard.set_filter(ActionFilter::default());
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn observers_are_called_in_subscription_order() {
        let mut dashboard = Dashboard::new(clock(), PriorityWindows::default());
        let order = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&order);
        let _a = dashboard.subscribe(move |_| first.borrow_mut().push("first"));
        let second = Rc::clone(&order);
        let _b = dashboard.subscribe(move |_| second.borrow_mut().push("second"));

        dashboard.refresh();
        assert_eq!(*order.borrow(), ["first", "second"]);
    }

    #[test]
    fn subscription_dropped_inside_observer_is_released() {
        let mut dashboard = Dashboard::new(clock(), PriorityWindows::default());
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(RefCell::new(0));

        let inner_slot = Rc::clone(&slot);
        let inner_calls = Rc::clone(&calls);
        let subscription = dashboard.subscribe(move |_| {
            *inner_calls.borrow_mut() += 1;
            drop(inner_slot.borrow_mut().take());
        });
        *slot.borrow_mut() = Some(subscription);

        dashboard.refresh();
        dashboard.refresh();
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(dashboard.observer_count(), 0);
    }

    #[test]
    fn filter_changes_narrow_the_stats() {
        let mut dashboard = Dashboard::new(clock(), PriorityWindows::default());
        dashboard.publish(snapshot());
        assert_eq!(dashboard.view().action_stats.total, 3);
        assert_eq!(dashboard.view().action_stats.critical, 1);

        let view = dashboard.set_filter(ActionFilter {
            owner: Selection::Only("u-9".to_string()),
            ..ActionFilter::default()
        });
        assert_eq!(view.actions.len(), 1);
        assert_eq!(view.total_actions, 3);
        assert_eq!(view.action_stats.total, 1);
        assert_eq!(view.action_stats.overdue, 0);
        assert_eq!(view.action_stats.critical, 0);
    }

    #[test]
    fn stats_follow_the_project_filter() {
        let closed = ActionItem {
            id: "a-2".to_string(),
            project_id: "p-2".to_string(),
            status: Some(ActionStatus::Closed),
            ..ActionItem::default()
        };
        let snapshot = Snapshot {
            actions: vec![
                ActionItem {
                    id: "a-1".to_string(),
                    project_id: "p-1".to_string(),
                    status: Some(ActionStatus::Open),
                    ..ActionItem::default()
                },
                closed,
            ],
            ..Snapshot::default()
        };
        let filter = ActionFilter {
            project: Selection::Only("p-1".to_string()),
            ..ActionFilter::default()
        };
        let view =
            DashboardView::compute(&snapshot, &filter, clock().now(), &PriorityWindows::default());
        assert_eq!(view.action_stats.total, view.actions.len());
        assert_eq!(view.action_stats.open, 1);
        assert_eq!(view.action_stats.closed, 0);
    }
}

use chrono::{DateTime, Utc};
use hse_core::model::{Project, ProjectStatus};
use serde::Serialize;

use crate::{percent, round_half_up};

/// Portfolio counters for the project analytics view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProjectStats {
    pub total: usize,
    pub active: usize,
    /// Completed or archived.
    pub completed: usize,
    pub overdue: usize,
    pub total_budget: f64,
    pub total_spent: f64,
    /// Percent of the total budget already spent; 0 without a budget.
    pub budget_health: i64,
    pub avg_progress: i64,
}

/// Past its finish date and not yet completed or archived.
#[must_use]
pub fn is_project_overdue(project: &Project, now: DateTime<Utc>) -> bool {
    project.finish_date.is_some_and(|finish| finish < now) && !project.is_finished()
}

#[must_use]
pub fn project_stats(projects: &[Project], now: DateTime<Utc>) -> ProjectStats {
    let mut stats = ProjectStats {
        total: projects.len(),
        ..ProjectStats::default()
    };
    let mut progress_sum = 0.0;

    for project in projects {
        match project.status {
            Some(ProjectStatus::Active) => stats.active += 1,
            Some(ProjectStatus::Completed | ProjectStatus::Archived) => stats.completed += 1,
            _ => {}
        }
        if is_project_overdue(project, now) {
            stats.overdue += 1;
        }
        stats.total_budget += project.budget.unwrap_or(0.0);
        stats.total_spent += project.budget_spent.unwrap_or(0.0);
        progress_sum += project.progress.unwrap_or(0.0);
    }

    stats.budget_health = percent(stats.total_spent, stats.total_budget);
    if !projects.is_empty() {
        #[allow(clippy::cast_precision_loss)]
        let count = projects.len() as f64;
        stats.avg_progress = round_half_up(progress_sum / count);
    }
    stats
}

/// One slice of the project status chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusSlice {
    pub label: &'static str,
    pub value: usize,
}

/// Active/completed/overdue/pending slices, omitting empty ones.
///
/// `pending` is whatever the other three do not cover. Overdue projects are
/// usually also active, so the slices can sum to more than `total`.
#[must_use]
pub fn status_distribution(stats: &ProjectStats) -> Vec<StatusSlice> {
    let pending = stats
        .total
        .saturating_sub(stats.active + stats.completed + stats.overdue);
    [
        ("Active", stats.active),
        ("Completed", stats.completed),
        ("Overdue", stats.overdue),
        ("Pending", pending),
    ]
    .into_iter()
    .filter(|(_, value)| *value > 0)
    .map(|(label, value)| StatusSlice { label, value })
    .collect()
}

/// Share of the planned schedule already elapsed, clamped to 0–100.
///
/// `None` when either date is missing or the finish is not after the start.
#[must_use]
pub fn elapsed_percent(project: &Project, now: DateTime<Utc>) -> Option<i64> {
    let start = project.start_date?;
    let finish = project.finish_date?;
    let span = (finish - start).num_milliseconds();
    if span <= 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = (now - start).num_milliseconds() as f64 / span as f64;
    Some(round_half_up((100.0 * ratio).clamp(0.0, 100.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    fn project(status: Option<ProjectStatus>, finish_days: Option<i64>) -> Project {
        Project {
            status,
            finish_date: finish_days.map(|d| now() + Duration::days(d)),
            ..Project::default()
        }
    }

    #[test]
    fn budget_totals_and_health() {
        let projects = vec![
            Project {
                budget: Some(1000.0),
                budget_spent: Some(500.0),
                ..Project::default()
            },
            Project {
                budget: Some(0.0),
                budget_spent: Some(0.0),
                ..Project::default()
            },
        ];
        let stats = project_stats(&projects, now());
        assert!((stats.total_budget - 1000.0).abs() < f64::EPSILON);
        assert!((stats.total_spent - 500.0).abs() < f64::EPSILON);
        assert_eq!(stats.budget_health, 50);
    }

    #[test]
    fn empty_portfolio_is_all_zero() {
        assert_eq!(project_stats(&[], now()), ProjectStats::default());
        assert!(status_distribution(&ProjectStats::default()).is_empty());
    }

    #[test]
    fn finished_projects_are_never_overdue() {
        let projects = vec![
            project(Some(ProjectStatus::Active), Some(-1)),
            project(Some(ProjectStatus::Completed), Some(-1)),
            project(Some(ProjectStatus::Archived), Some(-10)),
            project(Some(ProjectStatus::Pending), None),
            project(None, Some(-2)),
        ];
        let stats = project_stats(&projects, now());
        assert_eq!(stats.active, 1);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.overdue, 2);
    }

    #[test]
    fn average_progress_counts_missing_as_zero() {
        let projects = vec![
            Project {
                progress: Some(50.0),
                ..Project::default()
            },
            Project {
                progress: Some(25.0),
                ..Project::default()
            },
            Project::default(),
        ];
        assert_eq!(project_stats(&projects, now()).avg_progress, 25);
    }

    #[test]
    fn distribution_drops_empty_slices() {
        let stats = ProjectStats {
            total: 5,
            active: 3,
            overdue: 1,
            ..ProjectStats::default()
        };
        let slices = status_distribution(&stats);
        assert_eq!(
            slices,
            vec![
                StatusSlice { label: "Active", value: 3 },
                StatusSlice { label: "Overdue", value: 1 },
                StatusSlice { label: "Pending", value: 1 },
            ]
        );
    }

    #[test]
    fn elapsed_percent_is_clamped() {
        let mut p = Project {
            start_date: Some(now() - Duration::days(10)),
            finish_date: Some(now() + Duration::days(30)),
            ..Project::default()
        };
        assert_eq!(elapsed_percent(&p, now()), Some(25));

        p.finish_date = Some(now() - Duration::days(1));
        assert_eq!(elapsed_percent(&p, now()), Some(100));

        p.start_date = Some(now() + Duration::days(1));
        p.finish_date = Some(now() + Duration::days(5));
        assert_eq!(elapsed_percent(&p, now()), Some(0));

        p.finish_date = p.start_date;
        assert_eq!(elapsed_percent(&p, now()), None);
        assert_eq!(elapsed_percent(&Project::default(), now()), None);
    }
}

//! Aggregate counters over record collections.
//!
//! Every calculator accepts an empty slice and returns all-zero stats.
//! Missing numbers count as 0; missing dates never make anything overdue.

mod action;
mod inspection;
mod permit;
mod project;
mod rates;
mod report;

pub use action::{ActionStats, action_stats, action_stats_with};
pub use inspection::{InspectionStats, inspection_stats};
pub use permit::{HIGH_RISK_PERMIT_TYPES, PermitStats, permit_stats};
pub use project::{
    ProjectStats, StatusSlice, elapsed_percent, is_project_overdue, project_stats,
    status_distribution,
};
pub use rates::{SafetyRates, WorkforceFigures, safety_rates};
pub use report::{ReportStats, report_stats};

#![forbid(unsafe_code)]
//! hse-metrics library.
//!
//! Pure selectors over [`hse_core::Snapshot`] collections: priority and
//! overdue classification, filtering, aggregate statistics, the activity feed
//! and checklist scoring. Every function takes `now` explicitly and returns
//! the same output for the same input.
//!
//! # Conventions
//!
//! - **Errors**: None. Malformed records degrade to zero counts, `Low`
//!   priority or placeholders; nothing here returns `Result` or panics.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod checklist;
pub mod dashboard;
pub mod feed;
pub mod filter;
pub mod priority;
pub mod risk;
pub mod stats;
pub mod status;

pub use checklist::{ChecklistScore, ScoreCheck, score_results, verify_run_score};
pub use dashboard::{ActionRow, Dashboard, DashboardView, Subscription};
pub use feed::{Activity, ActivityFeed, ActivityKind, ActivityPriority, assemble_feed};
pub use filter::{ActionFilter, PermitFilter, PermitGroup, RecordFilter, ReportFilter, Search, Selection};
pub use priority::{PriorityWindows, classify, classify_with};
pub use status::{DisplayStatus, DueLabel, is_overdue};

/// Round half toward positive infinity, as browsers' `Math.round` does.
///
/// Non-finite input rounds to 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_half_up(value: f64) -> i64 {
    if value.is_finite() {
        (value + 0.5).floor() as i64
    } else {
        0
    }
}

/// `round(100 * part / whole)`, or 0 when `whole` is not positive.
#[must_use]
pub fn percent(part: f64, whole: f64) -> i64 {
    if whole > 0.0 {
        round_half_up(100.0 * part / whole)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up_like_a_browser() {
        assert_eq!(round_half_up(66.5), 67);
        assert_eq!(round_half_up(66.49), 66);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-1.5), -1);
        assert_eq!(round_half_up(f64::NAN), 0);
    }

    #[test]
    fn percent_of_nothing_is_zero() {
        assert_eq!(percent(5.0, 0.0), 0);
        assert_eq!(percent(2.0, 3.0), 67);
        assert_eq!(percent(500.0, 1000.0), 50);
    }
}

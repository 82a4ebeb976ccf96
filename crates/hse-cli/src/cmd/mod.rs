pub mod actions;
pub mod checklists;
pub mod completions;
pub mod feed;
pub mod permits;
pub mod projects;
pub mod reports;
pub mod stats;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use hse_core::config::load_project_config;
use hse_core::{Clock, HseConfig, Snapshot, UserDirectory};
use hse_metrics::PriorityWindows;
use std::path::Path;
use tracing::debug;

/// Everything a reporting command reads: one snapshot, the project config and
/// the instant the report is computed at.
#[derive(Debug)]
pub struct Context {
    pub snapshot: Snapshot,
    pub config: HseConfig,
    pub now: DateTime<Utc>,
}

impl Context {
    /// Load the snapshot and `<project_root>/.hse/config.toml`, reading the
    /// clock once so a whole report sees the same `now`.
    pub fn load(
        snapshot_path: &Path,
        project_root: &Path,
        clock: &dyn Clock,
    ) -> anyhow::Result<Self> {
        let config = load_project_config(project_root)
            .with_context(|| format!("loading config under {}", project_root.display()))?;
        let snapshot = Snapshot::load(snapshot_path)?;
        let now = clock.now();
        debug!(%now, "report clock");

        Ok(Self {
            snapshot,
            config,
            now,
        })
    }

    pub fn windows(&self) -> PriorityWindows {
        PriorityWindows::from(self.config.priority)
    }

    pub fn directory(&self) -> UserDirectory<'_> {
        UserDirectory::new(&self.snapshot.users)
    }

    #[cfg(test)]
    pub fn fixture(json: &str) -> Self {
        Self {
            snapshot: Snapshot::from_json_str(json).unwrap(),
            config: HseConfig::default(),
            now: chrono::TimeZone::with_ymd_and_hms(&Utc, 2024, 6, 10, 12, 0, 0).unwrap(),
        }
    }
}

/// Format an optional instant as a calendar date, `-` when missing.
pub fn date_or_dash(instant: Option<DateTime<Utc>>) -> String {
    instant.map_or_else(|| "-".to_string(), |at| at.format("%Y-%m-%d").to_string())
}

/// Format an optional label, `-` when missing.
pub fn or_dash(value: Option<impl std::fmt::Display>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

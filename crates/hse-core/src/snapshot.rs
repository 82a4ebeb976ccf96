//! One delivery of every collection from the store.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::HseError;
use crate::model::{
    ActionItem, ChecklistRun, ChecklistTemplate, Inspection, Project, Ptw, Report, User, de,
};

/// All collections the metrics engine reads, as exported from the store.
///
/// Missing collections decode as empty; see [`crate::model::de`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    #[serde(alias = "action_items", deserialize_with = "de::list")]
    pub actions: Vec<ActionItem>,
    #[serde(deserialize_with = "de::list")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "de::list")]
    pub reports: Vec<Report>,
    #[serde(deserialize_with = "de::list")]
    pub inspections: Vec<Inspection>,
    #[serde(alias = "permits", deserialize_with = "de::list")]
    pub ptws: Vec<Ptw>,
    #[serde(deserialize_with = "de::list")]
    pub checklist_templates: Vec<ChecklistTemplate>,
    #[serde(deserialize_with = "de::list")]
    pub checklist_runs: Vec<ChecklistRun>,
    #[serde(deserialize_with = "de::list")]
    pub users: Vec<User>,
}

impl Snapshot {
    /// Decode a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Fails only when `raw` is not well-formed JSON of object shape.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom(
                "snapshot top level must be a JSON object",
            ));
        }
        serde_json::from_value(value)
    }

    /// Read and decode a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns [`HseError::SnapshotRead`] when the file cannot be read and
    /// [`HseError::SnapshotParse`] when it is not a JSON object.
    pub fn load(path: &Path) -> Result<Self, HseError> {
        let raw = std::fs::read_to_string(path).map_err(|source| HseError::SnapshotRead {
            path: PathBuf::from(path),
            source,
        })?;

        let snapshot = Self::from_json_str(&raw).map_err(|source| HseError::SnapshotParse {
            path: PathBuf::from(path),
            source,
        })?;

        debug!(
            path = %path.display(),
            actions = snapshot.actions.len(),
            projects = snapshot.projects.len(),
            reports = snapshot.reports.len(),
            inspections = snapshot.inspections.len(),
            ptws = snapshot.ptws.len(),
            checklist_runs = snapshot.checklist_runs.len(),
            users = snapshot.users.len(),
            "loaded snapshot"
        );

        Ok(snapshot)
    }

    /// Restrict every project-owned collection to `project_id`.
    ///
    /// Users and checklist templates belong to the organization and are kept whole.
    #[must_use]
    pub fn scoped_to_project(&self, project_id: &str) -> Self {
        Self {
            actions: keep(&self.actions, |a| a.project_id == project_id),
            projects: keep(&self.projects, |p| p.id == project_id),
            reports: keep(&self.reports, |r| r.project_id == project_id),
            inspections: keep(&self.inspections, |i| i.project_id == project_id),
            ptws: keep(&self.ptws, |p| p.project_id == project_id),
            checklist_templates: self.checklist_templates.clone(),
            checklist_runs: keep(&self.checklist_runs, |c| c.project_id == project_id),
            users: self.users.clone(),
        }
    }

    /// True when no collection holds any record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
            && self.projects.is_empty()
            && self.reports.is_empty()
            && self.inspections.is_empty()
            && self.ptws.is_empty()
            && self.checklist_templates.is_empty()
            && self.checklist_runs.is_empty()
            && self.users.is_empty()
    }
}

fn keep<T: Clone>(items: &[T], pred: impl Fn(&T) -> bool) -> Vec<T> {
    items.iter().filter(|item| pred(item)).cloned().collect()
}

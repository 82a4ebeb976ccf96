//! Filter predicates over record collections.
//!
//! Every filter is an AND of independent criteria. `All` criteria and blank
//! searches admit everything, and [`RecordFilter::apply`] keeps the input
//! order.

use hse_core::HseError;
use hse_core::model::{ActionItem, ActionStatus, Ptw, PtwStatus, Report, ReportStatus};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::feed::{Activity, ActivityKind};

/// A predicate over one record type.
pub trait RecordFilter<T> {
    fn matches(&self, record: &T) -> bool;

    /// Matching records, in input order.
    fn apply<'a>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

/// Either every value, or exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Selection<T> {
    #[must_use]
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    /// Like [`Selection::admits`]; a missing value only passes `All`.
    #[must_use]
    pub fn admits_opt(&self, value: Option<&T>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => value == Some(wanted),
        }
    }
}

impl<T: FromStr> Selection<T> {
    /// Parse a CLI-style filter value, naming `field` on failure.
    ///
    /// # Errors
    ///
    /// Returns [`HseError::InvalidFilter`] when `raw` is neither `All` nor a valid `T`.
    pub fn parse_as(raw: &str, field: &'static str) -> Result<Self, HseError> {
        raw.parse().map_err(|_| HseError::InvalidFilter {
            field,
            value: raw.to_string(),
        })
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            trimmed.parse().map(Self::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(value) => value.fmt(f),
        }
    }
}

impl<T: fmt::Display> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Case-insensitive substring query; blank queries match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Search {
    needle: String,
}

impl Search {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.needle.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// True when the query is blank or occurs in any of `fields`.
    pub fn matches_any<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> bool {
        self.is_blank()
            || fields
                .into_iter()
                .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

impl From<&str> for Search {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl Serialize for Search {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.needle)
    }
}

/// Action list filter: project, status, owner and free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionFilter {
    pub project: Selection<String>,
    pub status: Selection<ActionStatus>,
    pub owner: Selection<String>,
    /// Matched against the action text and its source description and id.
    pub search: Search,
}

impl RecordFilter<ActionItem> for ActionFilter {
    fn matches(&self, item: &ActionItem) -> bool {
        self.project.admits(&item.project_id)
            && self.status.admits_opt(item.status.as_ref())
            && self.owner.admits(&item.owner_id)
            && self.search.matches_any([
                item.action.as_str(),
                item.source.description.as_str(),
                item.source.id.as_str(),
            ])
    }
}

/// Incident report filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportFilter {
    #[serde(rename = "type")]
    pub kind: Selection<String>,
    pub status: Selection<ReportStatus>,
    /// Matched against the description and the report id.
    pub search: Search,
}

impl RecordFilter<Report> for ReportFilter {
    fn matches(&self, report: &Report) -> bool {
        self.kind.admits(&report.kind)
            && self.status.admits_opt(report.status.as_ref())
            && self
                .search
                .matches_any([report.description.as_str(), report.id.as_str()])
    }
}

/// Coarse permit lifecycle groups used by the permit register tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PermitGroup {
    #[default]
    All,
    Active,
    Draft,
    /// Closed or completed.
    Closed,
}

impl PermitGroup {
    pub const ALL: &'static [Self] = &[Self::All, Self::Active, Self::Draft, Self::Closed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Draft => "Draft",
            Self::Closed => "Closed",
        }
    }

    #[must_use]
    pub const fn admits(self, status: Option<PtwStatus>) -> bool {
        match self {
            Self::All => true,
            Self::Active => matches!(status, Some(PtwStatus::Active)),
            Self::Draft => matches!(status, Some(PtwStatus::Draft)),
            Self::Closed => matches!(status, Some(PtwStatus::Closed | PtwStatus::Completed)),
        }
    }
}

impl fmt::Display for PermitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermitGroup {
    type Err = HseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|group| group.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| HseError::InvalidFilter {
                field: "permit group",
                value: s.to_string(),
            })
    }
}

impl Serialize for PermitGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Permit register filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PermitFilter {
    pub group: PermitGroup,
    /// Matched against the title and the permit number.
    pub search: Search,
}

impl RecordFilter<Ptw> for PermitFilter {
    fn matches(&self, ptw: &Ptw) -> bool {
        self.group.admits(ptw.status)
            && self
                .search
                .matches_any([ptw.title.as_str(), ptw.payload.permit_no.as_str()])
    }
}

impl RecordFilter<Activity> for Selection<ActivityKind> {
    fn matches(&self, activity: &Activity) -> bool {
        self.admits(&activity.kind)
    }
}

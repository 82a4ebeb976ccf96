use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for scripted consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    SnapshotNotFound,
    SnapshotParseError,
    InvalidFilterValue,
    InvalidClock,
    ChecklistScoreMismatch,
    InternalUnexpected,
}

impl ErrorCode {
    pub const ALL: &'static [Self] = &[
        Self::ConfigParseError,
        Self::SnapshotNotFound,
        Self::SnapshotParseError,
        Self::InvalidFilterValue,
        Self::InvalidClock,
        Self::ChecklistScoreMismatch,
        Self::InternalUnexpected,
    ];

    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::SnapshotNotFound => "E1002",
            Self::SnapshotParseError => "E1003",
            Self::InvalidFilterValue => "E2001",
            Self::InvalidClock => "E2002",
            Self::ChecklistScoreMismatch => "E3001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::SnapshotNotFound => "Snapshot file not found",
            Self::SnapshotParseError => "Snapshot is not valid JSON",
            Self::InvalidFilterValue => "Invalid filter value",
            Self::InvalidClock => "Invalid clock value",
            Self::ChecklistScoreMismatch => "Stored checklist score disagrees with its results",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .hse/config.toml and retry."),
            Self::SnapshotNotFound => {
                Some("Pass --snapshot <FILE> or set HSE_SNAPSHOT to an exported snapshot.")
            }
            Self::SnapshotParseError => {
                Some("Re-export the snapshot; the top level must be a JSON object.")
            }
            Self::InvalidFilterValue => Some("Use `All` or one of the documented values."),
            Self::InvalidClock => {
                Some("Use an RFC 3339 instant such as 2024-05-01T09:00:00Z, or a YYYY-MM-DD date.")
            }
            Self::ChecklistScoreMismatch => {
                Some("Re-submit the affected runs so their scores are recorded again.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failures at the I/O and input edges. The metrics engine itself never errors.
#[derive(Debug, thiserror::Error)]
pub enum HseError {
    /// The snapshot file could not be read.
    #[error("failed to read snapshot {}: {source}", .path.display())]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot file is not a JSON object.
    #[error("failed to parse snapshot {}: {source}", .path.display())]
    SnapshotParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A filter argument named a value outside its closed set.
    #[error("invalid {field} filter: '{value}'")]
    InvalidFilter { field: &'static str, value: String },

    #[error("invalid timestamp: '{0}'")]
    InvalidTimestamp(String),

    /// Stored checklist scores that no longer match their results.
    #[error("{runs} checklist run(s) store a score that disagrees with their results")]
    ScoreMismatch { runs: usize },
}

impl HseError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::SnapshotRead { .. } => ErrorCode::SnapshotNotFound,
            Self::SnapshotParse { .. } => ErrorCode::SnapshotParseError,
            // An unreadable config is reported like an unparseable one.
            Self::ConfigRead { .. } | Self::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Self::InvalidFilter { .. } => ErrorCode::InvalidFilterValue,
            Self::InvalidTimestamp(_) => ErrorCode::InvalidClock,
            Self::ScoreMismatch { .. } => ErrorCode::ChecklistScoreMismatch,
        }
    }

    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        self.code().hint()
    }
}

//! Store documents as plain records.
//!
//! Field names mirror the store's snake_case wire names. Every field is
//! optional on the wire; see [`de`] for how missing or malformed values decode.

use std::fmt;

/// Declares a closed set of labelled values with lenient text parsing.
///
/// Each variant has a canonical wire label (used by `Display` and
/// `Serialize`) plus optional aliases. Parsing ignores case and treats `_`,
/// `-` and spaces as the same separator.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $expected:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Canonical wire label.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::model::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = $crate::model::normalize_token(s);
                $(
                    if wanted == $crate::model::normalize_token($label)
                        $(|| wanted == $crate::model::normalize_token($alias))*
                    {
                        return Ok(Self::$variant);
                    }
                )+
                Err($crate::model::ParseEnumError {
                    expected: $expected,
                    got: s.to_string(),
                })
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                raw.parse().map_err(::serde::de::Error::custom)
            }
        }
    };
}

pub mod action;
pub mod checklist;
pub mod de;
pub mod inspection;
pub mod project;
pub mod ptw;
pub mod report;
pub mod risk;
pub mod user;

pub use action::{ActionItem, ActionSource, ActionStatus, Priority, SourceType};
pub use checklist::{
    CheckResult, ChecklistItem, ChecklistRun, ChecklistTemplate, LocalizedText, RunResult,
    RunStatus,
};
pub use inspection::{Finding, FindingStatus, Inspection, InspectionStatus};
pub use project::{Project, ProjectStatus};
pub use ptw::{Ptw, PtwPayload, PtwStatus};
pub use report::{Report, ReportStatus};
pub use risk::{RiskLevel, RiskMatrix};
pub use user::{User, UserStatus};

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

/// Lower-case and unify separators so `In Progress`, `in_progress` and
/// `IN-PROGRESS` compare equal.
#[must_use]
pub fn normalize_token(input: &str) -> String {
    input
        .trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

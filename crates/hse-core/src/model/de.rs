//! Lenient field decoders for store documents.
//!
//! The store performs no validation, so a field can be missing, `null`, or of
//! the wrong JSON type. Every decoder here maps those cases to an empty value
//! instead of failing the whole document.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde::de::{Deserializer, IgnoredAny};
use std::str::FromStr;
use tracing::warn;

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Number(f64),
    Stamp {
        seconds: i64,
        #[serde(default)]
        nanoseconds: u32,
    },
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseRecord<T> {
    Value(T),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseSeq<T> {
    Items(Vec<T>),
    Other(IgnoredAny),
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp the way the browser client would.
///
/// Accepts RFC 3339, naive date-times (read as UTC) and date-only values
/// (midnight UTC). Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Decode a string field. Numbers are rendered as text; anything else is empty.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_text(deserializer)?.unwrap_or_default())
}

/// Decode an optional string field.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(value) => Some(value),
        Loose::Number(value) if value.is_finite() => Some(render_number(value)),
        Loose::Number(_) | Loose::Stamp { .. } | Loose::Other(_) => None,
    })
}

/// Decode a numeric field. Numeric strings are accepted; non-finite values are dropped.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Loose::deserialize(deserializer)? {
        Loose::Number(value) => Some(value),
        Loose::Text(value) => value.trim().parse::<f64>().ok(),
        Loose::Stamp { .. } | Loose::Other(_) => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}

/// Decode a timestamp field.
///
/// Strings go through [`parse_timestamp`], bare numbers are epoch
/// milliseconds, and `{seconds, nanoseconds}` objects are store timestamps.
pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(value) => parse_timestamp(&value),
        #[allow(clippy::cast_possible_truncation)]
        Loose::Number(value) if value.is_finite() => {
            DateTime::from_timestamp_millis(value.trunc() as i64)
        }
        Loose::Stamp {
            seconds,
            nanoseconds,
        } => DateTime::from_timestamp(seconds, nanoseconds),
        Loose::Number(_) | Loose::Other(_) => None,
    })
}

/// Decode an enum-valued field through its `FromStr` impl; unknown values become `None`.
pub fn variant<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(value) => value.parse().ok(),
        Loose::Number(_) | Loose::Stamp { .. } | Loose::Other(_) => None,
    })
}

/// Decode a nested record, falling back to its default when the value is not an object.
pub fn record<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(match LooseRecord::<T>::deserialize(deserializer)? {
        LooseRecord::Value(value) => value,
        LooseRecord::Other(_) => T::default(),
    })
}

/// Decode an array field; anything that is not an array becomes empty.
///
/// Elements are decoded one at a time. An element that does not decode as `T`
/// is skipped and the rest of the array is kept.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let elements = match LooseSeq::<LooseRecord<T>>::deserialize(deserializer)? {
        LooseSeq::Items(elements) => elements,
        LooseSeq::Other(_) => return Ok(Vec::new()),
    };

    let total = elements.len();
    let items: Vec<T> = elements
        .into_iter()
        .filter_map(|element| match element {
            LooseRecord::Value(item) => Some(item),
            LooseRecord::Other(_) => None,
        })
        .collect();

    let skipped = total - items.len();
    if skipped > 0 {
        warn!(
            record = std::any::type_name::<T>(),
            skipped, "skipped malformed list elements"
        );
    }
    Ok(items)
}

fn render_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

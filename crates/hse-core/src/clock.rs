//! Injectable wall clock.
//!
//! Every derived metric takes `now` explicitly. Callers obtain it from a
//! [`Clock`]: [`SystemClock`] in production, [`FixedClock`] in tests and when
//! a report is pinned to a specific instant.

use chrono::{DateTime, Duration, Utc};

use crate::error::HseError;
use crate::model::de::parse_timestamp;

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// The host's wall clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant until explicitly advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    #[must_use]
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Freeze at a textual instant (RFC 3339, naive date-time or date-only).
    ///
    /// # Errors
    ///
    /// Returns [`HseError::InvalidTimestamp`] when `raw` is not a recognizable instant.
    pub fn at(raw: &str) -> Result<Self, HseError> {
        parse_instant(raw).map(Self::new)
    }

    /// Move the frozen instant forward (or back, for negative durations).
    pub fn advance(&mut self, by: Duration) {
        self.instant += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Parse a user-supplied instant.
///
/// # Errors
///
/// Returns [`HseError::InvalidTimestamp`] when `raw` is not a recognizable instant.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, HseError> {
    parse_timestamp(raw).ok_or_else(|| HseError::InvalidTimestamp(raw.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn observe(clock: &impl Clock) -> DateTime<Utc> {
        clock.now()
    }

    #[test]
    fn fixed_clock_stays_put_until_advanced() {
        let mut clock = FixedClock::at("2024-05-01T09:00:00Z").unwrap();
        assert_eq!(clock.now(), clock.now());

        clock.advance(Duration::days(2));
        assert_eq!(
            clock.now(),
            Utc.with_ymd_and_hms(2024, 5, 3, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn clocks_work_through_references() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(observe(&&clock), clock.now());
    }

    #[test]
    fn system_clock_moves_forward() {
        let first = SystemClock.now();
        let second = SystemClock.now();
        assert!(second >= first);
    }

    #[test]
    fn invalid_instants_are_rejected() {
        let err = FixedClock::at("tomorrow-ish").unwrap_err();
        assert!(matches!(err, HseError::InvalidTimestamp(ref raw) if raw == "tomorrow-ish"));
        assert_eq!(err.code(), crate::ErrorCode::InvalidClock);
    }
}

//! Expiry timestamp utilities
//!
//! Expiry values are stored as RFC 3339 strings. Every decision about whether
//! a stored expiry has elapsed goes through [`has_time_passed`], with "now"
//! supplied by a [`Clock`] so callers can be driven from a fixed point in time.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::sync::RwLock;
use thiserror::Error;

/// A stored expiry value could not be parsed as a timestamp
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid expiry timestamp {value:?}: {reason}")]
pub struct TimeParseError {
    /// The raw value that failed to parse
    pub value: String,
    /// Parser message
    pub reason: String,
}

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by [`Utc::now`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    /// Move the clock to an absolute instant
    pub fn set(&self, at: DateTime<Utc>) {
        let mut now = self.now.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now = at;
    }

    /// Move the clock forward by `by`
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Parse a stored RFC 3339 expiry value
pub fn parse_expiry(expiry: &str) -> Result<DateTime<Utc>, TimeParseError> {
    DateTime::parse_from_rfc3339(expiry.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| TimeParseError {
            value: expiry.to_string(),
            reason: e.to_string(),
        })
}

/// Report whether `now` is at or past the stored expiry
///
/// A parse failure is an operational fault and must never be read as
/// "not expired".
pub fn has_time_passed(expiry: &str, now: DateTime<Utc>) -> Result<bool, TimeParseError> {
    let expiry = parse_expiry(expiry)?;
    Ok(now >= expiry)
}

/// Format an instant the way expiry values are stored (second precision, `Z` suffix)
pub fn format_expiry(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_future_expiry_has_not_passed() {
        let expiry = format_expiry(t0() + Duration::hours(24));
        assert!(!has_time_passed(&expiry, t0()).unwrap());
    }

    #[test]
    fn test_expiry_equal_to_now_has_passed() {
        let expiry = format_expiry(t0());
        assert!(has_time_passed(&expiry, t0()).unwrap());
    }

    #[test]
    fn test_past_expiry_has_passed() {
        let expiry = format_expiry(t0() - Duration::seconds(1));
        assert!(has_time_passed(&expiry, t0()).unwrap());
    }

    #[test]
    fn test_offset_timestamps_are_compared_in_utc() {
        // 08:00-05:00 is 13:00Z, one hour after t0
        assert!(!has_time_passed("2025-01-10T08:00:00-05:00", t0()).unwrap());
        assert!(has_time_passed("2025-01-10T06:00:00-05:00", t0()).unwrap());
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let err = has_time_passed("next tuesday", t0()).unwrap_err();
        assert_eq!(err.value, "next tuesday");
        assert!(has_time_passed("", t0()).is_err());
    }

    #[test]
    fn test_format_round_trips_through_parse() {
        let formatted = format_expiry(t0());
        assert_eq!(formatted, "2025-01-10T12:00:00Z");
        assert_eq!(parse_expiry(&formatted).unwrap(), t0());
    }

    #[test]
    fn test_manual_clock_moves_only_when_told() {
        let clock = ManualClock::new(t0());
        assert_eq!(clock.now(), t0());

        clock.advance(Duration::hours(23));
        assert_eq!(clock.now(), t0() + Duration::hours(23));

        clock.set(t0());
        assert_eq!(clock.now(), t0());
    }
}

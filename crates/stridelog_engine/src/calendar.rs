//! Calendar-day parsing and normalization.
//!
//! Every date in the engine is a plain UTC calendar day; anything carrying a
//! time-of-day is truncated to its date part at the boundary so day-equality
//! checks never depend on wall-clock time.

use chrono::NaiveDate;

use crate::{EngineError, EngineResult};

/// Parse a user-supplied date into a calendar day.
///
/// Accepts:
/// - `YYYY-MM-DD`
/// - RFC3339 datetime (date part extracted)
/// - Naive datetime `YYYY-MM-DDTHH:MM:SS` (date part extracted)
pub fn parse_day(s: &str) -> EngineResult<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(ndt.date());
    }
    Err(EngineError::InvalidDate(format!("unparseable date: {s}")))
}

pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

pub fn is_future(day: NaiveDate, today: NaiveDate) -> bool {
    day > today
}

/// Whether `day` lies more than `max_days` before `today`. Used to bound how
/// far back log operations may write.
pub fn is_too_old(day: NaiveDate, today: NaiveDate, max_days: i64) -> bool {
    (today - day).num_days() > max_days
}

/// Source of "today". Injected so request handling stays deterministic under
/// test while production uses the UTC wall clock.
pub trait Clock: Send + Sync + 'static {
    fn today(&self) -> NaiveDate;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct UtcClock;

impl Clock for UtcClock {
    fn today(&self) -> NaiveDate {
        chrono::Utc::now().date_naive()
    }
}

/// Fixed-date clock for tests and replay tooling.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parse_day_accepts_plain_date() {
        assert_eq!(parse_day("2026-03-15").unwrap(), d("2026-03-15"));
    }

    #[test]
    fn parse_day_strips_rfc3339_time() {
        assert_eq!(parse_day("2026-03-15T10:30:00Z").unwrap(), d("2026-03-15"));
    }

    #[test]
    fn parse_day_strips_naive_datetime_time() {
        assert_eq!(parse_day("2026-03-15T23:59:59").unwrap(), d("2026-03-15"));
    }

    #[test]
    fn parse_day_rejects_garbage() {
        assert!(matches!(
            parse_day("not-a-date"),
            Err(EngineError::InvalidDate(_))
        ));
    }

    #[test]
    fn future_and_backfill_checks() {
        let today = d("2026-03-15");
        assert!(is_future(d("2026-03-16"), today));
        assert!(!is_future(today, today));
        assert!(!is_too_old(d("2026-03-08"), today, 7));
        assert!(is_too_old(d("2026-03-07"), today, 7));
    }

    #[test]
    fn fixed_clock_returns_its_day() {
        let clock = FixedClock(d("2026-01-01"));
        assert_eq!(clock.today(), d("2026-01-01"));
    }
}

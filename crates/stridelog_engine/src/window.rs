//! Date-range resolution: turning optional user-supplied bounds into a
//! validated, inclusive calendar-day window.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::{EngineError, EngineResult, StatsPeriod};

/// Hard upper bound on any history window, regardless of caller limits.
pub const MAX_RANGE_DAYS: i64 = 90;

/// An inclusive `[start, end]` range of calendar days with `start <= end`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if start > end {
            return Err(EngineError::InvalidDate(
                "start date must be before or equal to end date".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Window ending at `end` covering the period's nominal length, inclusive
    /// of the end day ("week" is the end day plus the 6 preceding days).
    pub fn period_ending(end: NaiveDate, period: StatsPeriod) -> Self {
        Self {
            start: end - Duration::days(period.days() - 1),
            end,
        }
    }

    /// Window ending at `end` reaching `days_back` days into the past.
    pub fn trailing(end: NaiveDate, days_back: i64) -> Self {
        Self {
            start: end - Duration::days(days_back),
            end,
        }
    }

    /// Number of calendar days in the window, inclusive of both bounds.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Distance in days between the bounds (exclusive of the start day).
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }
}

/// What to do when a resolved window exceeds its allowed span. The two
/// variants are intentionally distinct policies, not a unified rule: step
/// history silently narrows the window, meal history refuses it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpanPolicy {
    /// Recompute `start` as `end - limit` when the span exceeds `limit`.
    /// `limit` itself is capped at [`MAX_RANGE_DAYS`].
    Clamp { limit: i64 },
    /// Fail with [`EngineError::RangeTooLarge`] when the span exceeds
    /// `max_days`.
    Reject { max_days: i64 },
}

/// Resolve optional raw bounds into a validated window.
///
/// `end` defaults to `today`; `start` defaults to `end - default_lookback_days`.
pub fn resolve(
    start_input: Option<&str>,
    end_input: Option<&str>,
    today: NaiveDate,
    default_lookback_days: i64,
    policy: SpanPolicy,
) -> EngineResult<DateWindow> {
    let end = match end_input {
        Some(raw) => calendar::parse_day(raw)?,
        None => today,
    };
    let start = match start_input {
        Some(raw) => calendar::parse_day(raw)?,
        None => end - Duration::days(default_lookback_days),
    };

    let window = DateWindow::new(start, end)?;

    match policy {
        SpanPolicy::Clamp { limit } => {
            let limit = limit.min(MAX_RANGE_DAYS);
            if window.span_days() > limit {
                tracing::debug!(span = window.span_days(), limit, "window clamped");
                Ok(DateWindow {
                    start: end - Duration::days(limit),
                    end,
                })
            } else {
                Ok(window)
            }
        }
        SpanPolicy::Reject { max_days } => {
            if window.span_days() > max_days {
                Err(EngineError::RangeTooLarge(max_days))
            } else {
                Ok(window)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn defaults_to_lookback_ending_today() {
        let today = d("2026-03-15");
        let w = resolve(None, None, today, 7, SpanPolicy::Clamp { limit: 30 }).unwrap();
        assert_eq!(w.end, today);
        assert_eq!(w.start, d("2026-03-08"));
        assert_eq!(w.len_days(), 8);
    }

    #[test]
    fn explicit_bounds_pass_through() {
        let today = d("2026-03-15");
        let w = resolve(
            Some("2026-02-01"),
            Some("2026-02-10"),
            today,
            7,
            SpanPolicy::Reject { max_days: 90 },
        )
        .unwrap();
        assert_eq!(w.start, d("2026-02-01"));
        assert_eq!(w.end, d("2026-02-10"));
    }

    #[test]
    fn inverted_range_is_invalid() {
        let today = d("2026-03-15");
        let err = resolve(
            Some("2024-03-10"),
            Some("2024-01-01"),
            today,
            7,
            SpanPolicy::Clamp { limit: 90 },
        )
        .unwrap_err();
        match err {
            EngineError::InvalidDate(msg) => {
                assert!(msg.contains("before or equal"));
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_bound_is_invalid() {
        let today = d("2026-03-15");
        assert!(matches!(
            resolve(
                Some("yesterday"),
                None,
                today,
                7,
                SpanPolicy::Clamp { limit: 90 }
            ),
            Err(EngineError::InvalidDate(_))
        ));
    }

    #[test]
    fn clamp_narrows_silently() {
        let today = d("2026-06-30");
        let w = resolve(
            Some("2026-01-01"),
            Some("2026-06-30"),
            today,
            7,
            SpanPolicy::Clamp { limit: 30 },
        )
        .unwrap();
        assert_eq!(w.end, d("2026-06-30"));
        assert_eq!(w.start, d("2026-05-31"));
    }

    #[test]
    fn clamp_limit_is_hard_capped_at_90() {
        let today = d("2026-12-31");
        let w = resolve(
            Some("2026-01-01"),
            Some("2026-12-31"),
            today,
            7,
            SpanPolicy::Clamp { limit: 400 },
        )
        .unwrap();
        assert_eq!(w.span_days(), 90);
    }

    #[test]
    fn reject_fails_over_max() {
        let today = d("2026-06-30");
        let err = resolve(
            Some("2026-01-01"),
            Some("2026-06-30"),
            today,
            7,
            SpanPolicy::Reject { max_days: 90 },
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::RangeTooLarge(90)));
    }

    #[test]
    fn reject_allows_exactly_max() {
        let today = d("2026-06-30");
        let w = resolve(
            Some("2026-04-01"),
            Some("2026-06-30"),
            today,
            7,
            SpanPolicy::Reject { max_days: 90 },
        )
        .unwrap();
        assert_eq!(w.span_days(), 90);
    }

    #[test]
    fn period_windows_cover_nominal_lengths() {
        let end = d("2026-03-15");
        assert_eq!(
            DateWindow::period_ending(end, StatsPeriod::Week).start,
            d("2026-03-09")
        );
        assert_eq!(
            DateWindow::period_ending(end, StatsPeriod::Month).len_days(),
            30
        );
        assert_eq!(
            DateWindow::period_ending(end, StatsPeriod::Year).len_days(),
            365
        );
    }

    #[test]
    fn single_day_window_is_degenerate_but_valid() {
        let w = DateWindow::single(d("2026-03-15"));
        assert_eq!(w.len_days(), 1);
        assert!(w.contains(d("2026-03-15")));
        assert!(!w.contains(d("2026-03-16")));
    }
}

//! Consecutive-active-day streak counting.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

use crate::DailySteps;

/// How far back stats queries fetch history for streak computation, so a
/// weekly view can still surface a months-long streak.
pub const STREAK_LOOKBACK_DAYS: i64 = 90;

/// Length of the run of active days ending at `reference`.
///
/// `history` may be sparse (active days only) or dense (gap-filled); it is
/// expected most-recent-first and to reach back far enough to cover the
/// longest streak worth reporting (see [`STREAK_LOOKBACK_DAYS`]).
///
/// The walk anchors on the reference day: its activity is evaluated once, up
/// front, and backward days extend the count only while that anchor holds.
/// When the reference day itself is inactive, the first backward step is
/// tolerated without terminating the walk (the day may simply not be logged
/// yet), but no earlier run is counted toward an inactive reference day. Any
/// inactive day after that first step ends the walk.
pub fn current_streak(history: &[DailySteps], reference: NaiveDate) -> u32 {
    if history.is_empty() {
        return 0;
    }

    let active: HashSet<NaiveDate> = history
        .iter()
        .filter(|e| e.is_active())
        .map(|e| e.day)
        .collect();

    let reference_active = active.contains(&reference);
    let mut streak: u32 = if reference_active { 1 } else { 0 };

    let mut day = reference;
    for i in 1..history.len() {
        day = day - Duration::days(1);
        if reference_active && active.contains(&day) {
            streak += 1;
        } else if i == 1 && !reference_active {
            // Reference day missed; give yesterday a chance to hold the walk
            // open without counting it.
        } else {
            break;
        }
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(day: NaiveDate, steps: u32) -> DailySteps {
        DailySteps {
            id: Some(format!("s-{day}")),
            user_id: "u1".into(),
            day,
            steps,
            distance_km: 0.0,
            calories_burned: 0.0,
        }
    }

    /// Most-recent-first run of `days` entries ending at `reference`.
    fn run(reference: NaiveDate, steps_per_day: &[u32]) -> Vec<DailySteps> {
        steps_per_day
            .iter()
            .enumerate()
            .map(|(i, &steps)| entry(reference - Duration::days(i as i64), steps))
            .collect()
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(current_streak(&[], d("2026-03-15")), 0);
    }

    #[test]
    fn reference_day_plus_nine_active_predecessors_is_ten() {
        let reference = d("2026-03-15");
        let history = run(reference, &[4000; 10]);
        assert_eq!(current_streak(&history, reference), 10);
    }

    #[test]
    fn inactive_day_inside_the_run_breaks_the_streak() {
        let reference = d("2026-03-15");
        let history = run(reference, &[4000, 5000, 0, 7000, 8000]);
        assert_eq!(current_streak(&history, reference), 2);
    }

    #[test]
    fn missing_day_inside_the_run_breaks_the_streak() {
        let reference = d("2026-03-15");
        // Sparse history: reference and two days back, nothing for yesterday.
        let history = vec![
            entry(reference, 4000),
            entry(reference - Duration::days(2), 9000),
        ];
        assert_eq!(current_streak(&history, reference), 1);
    }

    // The next three tests pin the deliberately preserved branch asymmetry
    // around an inactive reference day. These are fixed behavior, not
    // inferred intent; changing them must be an intentional, visible diff.

    #[test]
    fn inactive_reference_with_active_yesterday_counts_nothing() {
        let reference = d("2026-03-15");
        let history = run(reference, &[0, 500, 0]);
        assert_eq!(current_streak(&history, reference), 0);
    }

    #[test]
    fn inactive_reference_does_not_resume_over_longer_runs() {
        let reference = d("2026-03-15");
        let history = run(reference, &[0, 500, 500]);
        assert_eq!(current_streak(&history, reference), 0);
    }

    #[test]
    fn inactive_reference_and_inactive_yesterday_still_walks_then_stops() {
        let reference = d("2026-03-15");
        let history = run(reference, &[0, 0, 500]);
        assert_eq!(current_streak(&history, reference), 0);
    }

    #[test]
    fn walk_is_bounded_by_history_length() {
        let reference = d("2026-03-15");
        // Two entries only; even a longer real run cannot be observed.
        let history = run(reference, &[4000, 4000]);
        assert_eq!(current_streak(&history, reference), 2);
    }

    #[test]
    fn dense_gap_filled_input_matches_sparse_input() {
        let reference = d("2026-03-15");
        let dense = run(reference, &[4000, 5000, 6000, 0, 2000]);
        let sparse: Vec<DailySteps> = dense.iter().filter(|e| e.is_active()).cloned().collect();
        assert_eq!(
            current_streak(&dense, reference),
            current_streak(&sparse, reference)
        );
    }
}

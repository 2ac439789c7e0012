//! Gap-filling: expanding a sparse set of per-day records into a dense,
//! most-recent-first series covering every day of a window.

use std::collections::HashMap;

use chrono::Duration;

use crate::DailySteps;
use crate::window::DateWindow;

/// Produce one entry per calendar day in `window`, descending by day.
///
/// Days with a persisted record pass through unchanged; every other day gets
/// a zero-valued synthetic entry. The output length is always
/// `window.len_days()`, no matter how sparse the input. A window with
/// `start > end` is a caller bug, not a runtime condition; `DateWindow`
/// construction already forbids it.
pub fn fill_gaps(records: &[DailySteps], window: DateWindow, user_id: &str) -> Vec<DailySteps> {
    let by_day: HashMap<_, _> = records.iter().map(|r| (r.day, r)).collect();

    let mut filled = Vec::with_capacity(window.len_days() as usize);
    let mut day = window.end;
    loop {
        match by_day.get(&day) {
            Some(existing) => filled.push((*existing).clone()),
            None => filled.push(DailySteps::synthetic(user_id, day)),
        }
        if day == window.start {
            break;
        }
        day = day - Duration::days(1);
    }
    filled
}

//! Period aggregation: totals, averages, extrema, and threshold counts over
//! a series of per-day records.
//!
//! Averages deliberately use different denominators per domain: step stats
//! divide by the nominal period length (7/30/365) no matter how many days
//! were logged, while nutrition stats divide by the number of days that
//! actually have entries. Extrema iterate ascending by date and keep the
//! first occurrence on ties.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{DailySteps, Meal, NutritionTotals, StatsPeriod};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StepsDay {
    pub day: NaiveDate,
    pub steps: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CalorieDay {
    pub day: NaiveDate,
    pub calories: i64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StepsStats {
    pub total_steps: u64,
    pub average_steps: u32,
    pub total_distance_km: f64,
    pub total_calories: i64,
    pub best_day: Option<StepsDay>,
    pub worst_day: Option<StepsDay>,
    pub current_streak: u32,
    pub days_with_activity: u32,
    pub goal_reached_days: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayNutrition {
    pub totals: NutritionTotals,
    pub meal_count: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct NutritionStats {
    pub total_calories: i64,
    pub average_calories: i64,
    pub total_protein: i64,
    pub average_protein: i64,
    pub total_carbs: i64,
    pub average_carbs: i64,
    pub total_fat: i64,
    pub average_fat: i64,
    pub days_logged: u32,
    pub total_meals: u32,
    pub average_meals_per_day: u32,
    pub highest_calorie_day: Option<CalorieDay>,
    pub lowest_calorie_day: Option<CalorieDay>,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Aggregate step records over a named period.
///
/// `history` holds the persisted records for the period window (sparse is
/// fine; synthetic zero days would contribute nothing anyway). The streak
/// field is left at zero: it is computed over a longer lookback than the
/// stats window and filled in by the caller.
pub fn aggregate_steps(history: &[DailySteps], period: StatsPeriod, goal: u32) -> StepsStats {
    // Unique day -> record, ascending, so extremum tie-breaks are
    // deterministic: the earliest day with the extreme value wins.
    let by_day: BTreeMap<NaiveDate, &DailySteps> = history.iter().map(|e| (e.day, e)).collect();

    let mut stats = StepsStats::default();
    let mut total_distance = 0.0_f64;
    let mut total_calories = 0.0_f64;
    let mut best: Option<StepsDay> = None;
    let mut worst: Option<StepsDay> = None;

    for (&day, entry) in &by_day {
        stats.total_steps += entry.steps as u64;
        total_distance += entry.distance_km;
        total_calories += entry.calories_burned;

        if entry.steps > 0 {
            stats.days_with_activity += 1;
        }
        if entry.steps >= goal {
            stats.goal_reached_days += 1;
        }

        if best.as_ref().is_none_or(|b| entry.steps > b.steps) {
            best = Some(StepsDay {
                day,
                steps: entry.steps,
            });
        }
        if worst.as_ref().is_none_or(|w| entry.steps < w.steps) {
            worst = Some(StepsDay {
                day,
                steps: entry.steps,
            });
        }
    }

    stats.average_steps = (stats.total_steps as f64 / period.days() as f64).round() as u32;
    stats.total_distance_km = round2(total_distance);
    stats.total_calories = total_calories.round() as i64;
    stats.best_day = best;
    stats.worst_day = worst;
    stats
}

/// Group itemized meals into ascending per-day macro totals.
pub fn group_meals_by_day(meals: &[Meal]) -> BTreeMap<NaiveDate, DayNutrition> {
    let mut daily: BTreeMap<NaiveDate, DayNutrition> = BTreeMap::new();
    for meal in meals {
        let day = daily.entry(meal.day).or_default();
        day.totals.accumulate(&meal.totals);
        day.meal_count += 1;
    }
    daily
}

/// Aggregate grouped per-day nutrition totals.
///
/// The denominator for every average is the number of distinct logged days,
/// never the window length; an empty map yields all-zero stats.
pub fn aggregate_nutrition(
    daily: &BTreeMap<NaiveDate, DayNutrition>,
    total_meals: u32,
) -> NutritionStats {
    let mut totals = NutritionTotals::default();
    let mut highest: Option<CalorieDay> = None;
    let mut lowest: Option<CalorieDay> = None;

    for (&day, entry) in daily {
        totals.accumulate(&entry.totals);

        let calories = entry.totals.calories.round() as i64;
        if highest.as_ref().is_none_or(|h| calories > h.calories) {
            highest = Some(CalorieDay { day, calories });
        }
        if lowest.as_ref().is_none_or(|l| calories < l.calories) {
            lowest = Some(CalorieDay { day, calories });
        }
    }

    let days_logged = daily.len() as u32;
    let avg = |total: f64| -> i64 {
        if days_logged > 0 {
            (total / days_logged as f64).round() as i64
        } else {
            0
        }
    };

    NutritionStats {
        total_calories: totals.calories.round() as i64,
        average_calories: avg(totals.calories),
        total_protein: totals.protein.round() as i64,
        average_protein: avg(totals.protein),
        total_carbs: totals.carbs.round() as i64,
        average_carbs: avg(totals.carbs),
        total_fat: totals.fat.round() as i64,
        average_fat: avg(totals.fat),
        days_logged,
        total_meals,
        average_meals_per_day: if days_logged > 0 {
            (total_meals as f64 / days_logged as f64).round() as u32
        } else {
            0
        },
        highest_calorie_day: highest,
        lowest_calorie_day: lowest,
    }
}

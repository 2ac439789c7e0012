//! Goal progress arithmetic and the derived per-step metrics.

use serde::{Deserialize, Serialize};

use crate::NutritionTotals;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct GoalProgress {
    /// Percentage of goal, rounded to 2 decimal places. Zero when the goal
    /// itself is zero rather than dividing by it.
    pub percent: f64,
    pub reached: bool,
}

pub fn goal_progress(total: f64, goal: f64) -> GoalProgress {
    let percent = if goal == 0.0 {
        0.0
    } else {
        (total / goal * 100.0 * 100.0).round() / 100.0
    };
    GoalProgress {
        percent,
        reached: total >= goal,
    }
}

/// Per-field remaining-to-goal. Over-goal fields report zero, never a
/// negative surplus.
pub fn remaining(totals: &NutritionTotals, goals: &NutritionTotals) -> NutritionTotals {
    NutritionTotals {
        calories: (goals.calories - totals.calories).max(0.0),
        protein: (goals.protein - totals.protein).max(0.0),
        carbs: (goals.carbs - totals.carbs).max(0.0),
        fat: (goals.fat - totals.fat).max(0.0),
    }
}

/// Estimated distance for a step count (average stride ~0.8 m), 2 dp.
pub fn distance_for_steps(steps: u32) -> f64 {
    (steps as f64 * 0.0008 * 100.0).round() / 100.0
}

/// Estimated calorie burn for a step count (~0.04 kcal per step), whole
/// calories.
pub fn calories_for_steps(steps: u32) -> f64 {
    (steps as f64 * 0.04).round()
}

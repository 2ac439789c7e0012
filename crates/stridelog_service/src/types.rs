use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use stridelog_engine::aggregate::{NutritionStats, StepsStats};
use stridelog_engine::calendar::format_day;
use stridelog_engine::{DailySteps, Meal, MealFood, MealType, NutritionGoals, NutritionTotals,
    StatsPeriod};

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct LogStepsParams {
    pub user_id: String,
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    pub steps: i64,
    /// Derived from steps when absent.
    pub distance_km: Option<f64>,
    /// Derived from steps when absent.
    pub calories_burned: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct UpdateStepsParams {
    pub steps: Option<i64>,
    pub distance_km: Option<f64>,
    pub calories_burned: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct HistoryParams {
    /// Range start, `YYYY-MM-DD` (default: lookback before the end).
    pub start_date: Option<String>,
    /// Range end, `YYYY-MM-DD` (default: today).
    pub end_date: Option<String>,
    /// Maximum entries to return (default: 30, capped at 90).
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct StepsEntryResult {
    /// Absent for gap-filled placeholder days.
    pub id: Option<String>,
    pub date: String,
    pub steps: u32,
    pub distance_km: f64,
    pub calories_burned: f64,
}

impl From<DailySteps> for StepsEntryResult {
    fn from(entry: DailySteps) -> Self {
        Self {
            id: entry.id,
            date: format_day(entry.day),
            steps: entry.steps,
            distance_km: entry.distance_km,
            calories_burned: entry.calories_burned,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct StepsHistoryResult {
    pub history: Vec<StepsEntryResult>,
    pub total_days: u32,
    pub total_steps: u64,
    pub average_steps: u32,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct DayStepsResult {
    pub date: String,
    pub steps: u32,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct StepsStatsBody {
    pub total_steps: u64,
    pub average_steps: u32,
    pub total_distance_km: f64,
    pub total_calories: i64,
    pub best_day: Option<DayStepsResult>,
    pub worst_day: Option<DayStepsResult>,
    pub current_streak: u32,
    pub days_with_activity: u32,
    pub goal_reached_days: u32,
}

impl From<StepsStats> for StepsStatsBody {
    fn from(stats: StepsStats) -> Self {
        let day = |d: stridelog_engine::aggregate::StepsDay| DayStepsResult {
            date: format_day(d.day),
            steps: d.steps,
        };
        Self {
            total_steps: stats.total_steps,
            average_steps: stats.average_steps,
            total_distance_km: stats.total_distance_km,
            total_calories: stats.total_calories,
            best_day: stats.best_day.map(day),
            worst_day: stats.worst_day.map(day),
            current_streak: stats.current_streak,
            days_with_activity: stats.days_with_activity,
            goal_reached_days: stats.goal_reached_days,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct StepsStatsResult {
    pub period: StatsPeriod,
    pub stats: StepsStatsBody,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct TodayStepsResult {
    pub id: Option<String>,
    pub date: String,
    pub steps: u32,
    pub distance_km: f64,
    pub calories_burned: f64,
    pub goal_steps: u32,
    /// Percent of goal, 2 dp.
    pub goal_progress: f64,
    pub goal_reached: bool,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct LogMealParams {
    pub user_id: String,
    pub meal_type: MealType,
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    pub foods: Vec<MealFood>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct UpdateMealParams {
    pub meal_type: Option<MealType>,
    pub foods: Option<Vec<MealFood>>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct MealResult {
    pub id: String,
    pub meal_type: MealType,
    pub date: String,
    pub totals: NutritionTotals,
    pub foods: Vec<MealFood>,
    pub notes: Option<String>,
}

impl From<Meal> for MealResult {
    fn from(meal: Meal) -> Self {
        Self {
            id: meal.id,
            meal_type: meal.meal_type,
            date: format_day(meal.day),
            totals: meal.totals,
            foods: meal.foods,
            notes: meal.notes,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct MealDayResult {
    pub date: String,
    pub meals: Vec<MealResult>,
    pub totals: NutritionTotals,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct MealPeriodStats {
    pub total_days: u32,
    pub average_calories: i64,
    pub average_protein: i64,
    pub average_carbs: i64,
    pub average_fat: i64,
    pub total_calories: i64,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct MealHistoryResult {
    pub history: Vec<MealDayResult>,
    pub period_stats: MealPeriodStats,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct CalorieDayResult {
    pub date: String,
    pub calories: i64,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct NutritionStatsBody {
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
    pub highest_calorie_day: Option<CalorieDayResult>,
    pub lowest_calorie_day: Option<CalorieDayResult>,
}

impl From<NutritionStats> for NutritionStatsBody {
    fn from(stats: NutritionStats) -> Self {
        let day = |d: stridelog_engine::aggregate::CalorieDay| CalorieDayResult {
            date: format_day(d.day),
            calories: d.calories,
        };
        Self {
            total_calories: stats.total_calories,
            average_calories: stats.average_calories,
            total_protein: stats.total_protein,
            average_protein: stats.average_protein,
            total_carbs: stats.total_carbs,
            average_carbs: stats.average_carbs,
            total_fat: stats.total_fat,
            average_fat: stats.average_fat,
            days_logged: stats.days_logged,
            total_meals: stats.total_meals,
            average_meals_per_day: stats.average_meals_per_day,
            highest_calorie_day: stats.highest_calorie_day.map(day),
            lowest_calorie_day: stats.lowest_calorie_day.map(day),
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct MealStatsResult {
    pub period: StatsPeriod,
    pub stats: NutritionStatsBody,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct TodayMealsResult {
    pub date: String,
    pub meals: Vec<MealResult>,
    pub totals: NutritionTotals,
    pub goals: NutritionTotals,
    pub remaining: NutritionTotals,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SetNutritionGoalsParams {
    pub user_id: String,
    pub daily_calories: f64,
    pub daily_protein: f64,
    pub daily_carbs: f64,
    pub daily_fat: f64,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct NutritionGoalsResult {
    pub goals: NutritionGoals,
    /// True when no per-user goals exist and defaults are being reported.
    pub is_default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn synthetic_entries_serialize_without_an_id() {
        let entry = DailySteps::synthetic("u1", NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        let out: StepsEntryResult = entry.into();
        assert!(out.id.is_none());
        assert_eq!(out.date, "2026-03-01");

        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["steps"], 0);
        assert!(json["id"].is_null());
    }

    #[test]
    fn history_params_accept_partial_input() {
        let params: HistoryParams =
            serde_json::from_value(serde_json::json!({"end_date": "2026-03-01"})).unwrap();
        assert!(params.start_date.is_none());
        assert_eq!(params.end_date.as_deref(), Some("2026-03-01"));
        assert!(params.limit.is_none());
    }
}

//! Domain records, provider traits, and the temporal aggregation engine for
//! daily step and nutrition tracking.

use async_trait::async_trait;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod aggregate;
pub mod calendar;
pub mod config;
pub mod memory;
pub mod progress;
pub mod series;
pub mod streak;
pub mod window;

use window::DateWindow;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("date range cannot exceed {0} days")]
    RangeTooLarge(i64),
    #[error("invalid metric: {0}")]
    InvalidMetric(String),
    #[error("cannot log for a future date: {0}")]
    FutureDate(NaiveDate),
    #[error("cannot log more than {max_days} days in the past: {date}")]
    DateTooOld { date: NaiveDate, max_days: i64 },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("store error: {0}")]
    Store(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// One calendar day of step activity for one user. Days are UTC calendar
/// dates; the store guarantees at most one row per (user, day).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DailySteps {
    /// `None` marks a synthetic gap entry that has no persisted identity.
    pub id: Option<String>,
    pub user_id: String,
    pub day: NaiveDate,
    pub steps: u32,
    pub distance_km: f64,
    pub calories_burned: f64,
}

impl DailySteps {
    /// Zero-valued placeholder for a day with no persisted record.
    pub fn synthetic(user_id: &str, day: NaiveDate) -> Self {
        Self {
            id: None,
            user_id: user_id.to_string(),
            day,
            steps: 0,
            distance_km: 0.0,
            calories_burned: 0.0,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.id.is_none()
    }

    /// A day counts as active when its primary metric is strictly positive.
    pub fn is_active(&self) -> bool {
        self.steps > 0
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewDailySteps {
    pub user_id: String,
    pub day: NaiveDate,
    pub steps: u32,
    pub distance_km: f64,
    pub calories_burned: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StepsPatch {
    pub steps: Option<u32>,
    pub distance_km: Option<f64>,
    pub calories_burned: Option<f64>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct MealFood {
    pub food_id: Option<String>,
    pub food_name: String,
    pub brand_name: Option<String>,
    pub serving_size: f64,
    pub serving_unit: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Per-day macro totals. Also doubles as the value shape for goal targets and
/// remaining-to-goal figures.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl NutritionTotals {
    pub fn accumulate(&mut self, other: &NutritionTotals) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fat += other.fat;
    }

    pub fn from_foods(foods: &[MealFood]) -> Self {
        let mut totals = Self::default();
        for food in foods {
            totals.calories += food.calories;
            totals.protein += food.protein;
            totals.carbs += food.carbs;
            totals.fat += food.fat;
        }
        totals
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    pub id: String,
    pub user_id: String,
    pub meal_type: MealType,
    pub day: NaiveDate,
    pub totals: NutritionTotals,
    pub foods: Vec<MealFood>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewMeal {
    pub user_id: String,
    pub meal_type: MealType,
    pub day: NaiveDate,
    pub totals: NutritionTotals,
    pub foods: Vec<MealFood>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MealPatch {
    pub meal_type: Option<MealType>,
    pub totals: Option<NutritionTotals>,
    pub foods: Option<Vec<MealFood>>,
    pub notes: Option<String>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct NutritionGoals {
    pub daily_calories: f64,
    pub daily_protein: f64,
    pub daily_carbs: f64,
    pub daily_fat: f64,
}

impl NutritionGoals {
    pub fn as_totals(&self) -> NutritionTotals {
        NutritionTotals {
            calories: self.daily_calories,
            protein: self.daily_protein,
            carbs: self.daily_carbs,
            fat: self.daily_fat,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatsPeriod {
    Week,
    Month,
    Year,
}

impl StatsPeriod {
    /// Nominal period length in days, inclusive of the end day.
    pub fn days(self) -> i64 {
        match self {
            StatsPeriod::Week => 7,
            StatsPeriod::Month => 30,
            StatsPeriod::Year => 365,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatsPeriod::Week => "week",
            StatsPeriod::Month => "month",
            StatsPeriod::Year => "year",
        }
    }
}

/// Read/write access to persisted daily step records. Implementations must
/// return at most one record per (user, day) pair; the engine treats
/// duplicates as a provider bug, not data to reconcile.
#[async_trait]
pub trait StepsStore: Send + Sync + 'static {
    /// Records overlapping the window, most recent day first.
    async fn steps_history(
        &self,
        user_id: &str,
        window: DateWindow,
    ) -> EngineResult<Vec<DailySteps>>;
    async fn steps_for_day(
        &self,
        user_id: &str,
        day: NaiveDate,
    ) -> EngineResult<Option<DailySteps>>;
    /// Insert, or replace the existing record for the same (user, day).
    async fn upsert_steps(&self, entry: NewDailySteps) -> EngineResult<DailySteps>;
    async fn update_steps(
        &self,
        id: &str,
        user_id: &str,
        patch: StepsPatch,
    ) -> EngineResult<DailySteps>;
    async fn delete_steps(&self, id: &str, user_id: &str) -> EngineResult<()>;
}

#[async_trait]
pub trait MealStore: Send + Sync + 'static {
    /// Meals whose day falls inside the window, most recent day first.
    async fn meal_history(&self, user_id: &str, window: DateWindow) -> EngineResult<Vec<Meal>>;
    async fn meals_for_day(&self, user_id: &str, day: NaiveDate) -> EngineResult<Vec<Meal>>;
    async fn meal_by_id(&self, id: &str, user_id: &str) -> EngineResult<Option<Meal>>;
    async fn create_meal(&self, meal: NewMeal) -> EngineResult<Meal>;
    async fn update_meal(&self, id: &str, user_id: &str, patch: MealPatch) -> EngineResult<Meal>;
    async fn delete_meal(&self, id: &str, user_id: &str) -> EngineResult<()>;
}

/// Per-user goal targets. `None` means the caller should fall back to the
/// configured defaults.
#[async_trait]
pub trait GoalStore: Send + Sync + 'static {
    async fn nutrition_goals(&self, user_id: &str) -> EngineResult<Option<NutritionGoals>>;
    async fn set_nutrition_goals(
        &self,
        user_id: &str,
        goals: NutritionGoals,
    ) -> EngineResult<NutritionGoals>;
    async fn steps_goal(&self, user_id: &str) -> EngineResult<Option<u32>>;
}

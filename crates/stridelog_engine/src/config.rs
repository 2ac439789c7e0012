//! Engine defaults, overridable from the environment.

use crate::{EngineError, EngineResult, NutritionGoals};

/// Fallback daily nutrition targets for users without stored goals.
pub const DEFAULT_NUTRITION_GOALS: NutritionGoals = NutritionGoals {
    daily_calories: 2000.0,
    daily_protein: 150.0,
    daily_carbs: 250.0,
    daily_fat: 65.0,
};

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Daily step goal applied when the user has none stored.
    pub default_steps_goal: u32,
    pub default_nutrition_goals: NutritionGoals,
    /// Default lookback for history queries with no explicit start.
    pub history_lookback_days: i64,
    /// Hard cap on history window spans.
    pub max_range_days: i64,
    /// How far back to fetch when computing streaks.
    pub streak_lookback_days: i64,
    /// Oldest day (relative to today) a log operation may still write.
    pub backfill_limit_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_steps_goal: 10_000,
            default_nutrition_goals: DEFAULT_NUTRITION_GOALS,
            history_lookback_days: 7,
            max_range_days: crate::window::MAX_RANGE_DAYS,
            streak_lookback_days: crate::streak::STREAK_LOOKBACK_DAYS,
            backfill_limit_days: 7,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> EngineResult<Self> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function, so tests never have to mutate the process environment.
    pub fn from_env_with<F>(mut get: F) -> EngineResult<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(raw) = get("STRIDELOG_STEPS_GOAL") {
            cfg.default_steps_goal = parse(&raw, "STRIDELOG_STEPS_GOAL")?;
        }
        if let Some(raw) = get("STRIDELOG_HISTORY_LOOKBACK_DAYS") {
            cfg.history_lookback_days = parse(&raw, "STRIDELOG_HISTORY_LOOKBACK_DAYS")?;
        }
        if let Some(raw) = get("STRIDELOG_BACKFILL_LIMIT_DAYS") {
            cfg.backfill_limit_days = parse(&raw, "STRIDELOG_BACKFILL_LIMIT_DAYS")?;
        }
        Ok(cfg)
    }
}

fn parse<T: std::str::FromStr>(raw: &str, key: &str) -> EngineResult<T> {
    raw.parse()
        .map_err(|_| EngineError::Config(format!("{key}: invalid value {raw:?}")))
}

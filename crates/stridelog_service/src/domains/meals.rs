//! Meal logging and nutrition use-cases.

use metrics::counter;

use stridelog_engine::window::{DateWindow, SpanPolicy, resolve};
use stridelog_engine::{
    EngineError, MealFood, MealPatch, NewMeal, NutritionTotals, StatsPeriod, aggregate, calendar,
    progress,
};

use crate::error::TrackerResult;
use crate::types::{
    HistoryParams, LogMealParams, MealDayResult, MealHistoryResult, MealPeriodStats, MealResult,
    MealStatsResult, TodayMealsResult, UpdateMealParams,
};
use crate::{Tracker, TrackerError};

fn validated_foods(foods: &[MealFood]) -> TrackerResult<()> {
    if foods.is_empty() {
        return Err(TrackerError::Validation(
            "meal must contain at least one food".into(),
        ));
    }
    for food in foods {
        for (name, value) in [
            ("calories", food.calories),
            ("protein", food.protein),
            ("carbs", food.carbs),
            ("fat", food.fat),
        ] {
            if value < 0.0 {
                return Err(EngineError::InvalidMetric(format!(
                    "{name} cannot be negative for {}",
                    food.food_name
                ))
                .into());
            }
        }
    }
    Ok(())
}

impl Tracker {
    pub async fn log_meal(&self, params: LogMealParams) -> TrackerResult<MealResult> {
        counter!("tracker_requests_total", "op" => "log_meal").increment(1);
        validated_foods(&params.foods)?;
        let day = self.validated_log_day(&params.date)?;
        let totals = NutritionTotals::from_foods(&params.foods);

        let meal = self
            .meals
            .create_meal(NewMeal {
                user_id: params.user_id.clone(),
                meal_type: params.meal_type,
                day,
                totals,
                foods: params.foods,
                notes: params.notes,
            })
            .await?;
        tracing::info!(user_id = %params.user_id, day = %day, "logged meal");
        Ok(meal.into())
    }

    pub async fn update_meal(
        &self,
        id: &str,
        user_id: &str,
        params: UpdateMealParams,
    ) -> TrackerResult<MealResult> {
        counter!("tracker_requests_total", "op" => "update_meal").increment(1);
        let existing = self
            .meals
            .meal_by_id(id, user_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("meal {id}")))?;

        let mut patch = MealPatch {
            meal_type: params.meal_type,
            notes: params.notes,
            ..Default::default()
        };
        // An empty foods list is treated as "no change", matching the log
        // contract that a meal always keeps at least one food.
        if let Some(foods) = params.foods.filter(|f| !f.is_empty()) {
            validated_foods(&foods)?;
            patch.totals = Some(NutritionTotals::from_foods(&foods));
            patch.foods = Some(foods);
        }

        let updated = self.meals.update_meal(&existing.id, user_id, patch).await?;
        tracing::info!(user_id, id, "updated meal");
        Ok(updated.into())
    }

    pub async fn delete_meal(&self, id: &str, user_id: &str) -> TrackerResult<()> {
        counter!("tracker_requests_total", "op" => "delete_meal").increment(1);
        self.meals.delete_meal(id, user_id).await?;
        tracing::info!(user_id, id, "deleted meal");
        Ok(())
    }

    /// Meal history grouped per day, most recent day first, with period
    /// aggregates over the logged days. Windows beyond the hard cap are
    /// rejected, never clamped.
    pub async fn get_meal_history(
        &self,
        user_id: &str,
        params: HistoryParams,
    ) -> TrackerResult<MealHistoryResult> {
        counter!("tracker_requests_total", "op" => "get_meal_history").increment(1);
        let window = resolve(
            params.start_date.as_deref(),
            params.end_date.as_deref(),
            self.clock.today(),
            self.config.history_lookback_days,
            SpanPolicy::Reject {
                max_days: self.config.max_range_days,
            },
        )?;

        let meals = self.meals.meal_history(user_id, window).await?;
        let daily = aggregate::group_meals_by_day(&meals);
        let stats = aggregate::aggregate_nutrition(&daily, meals.len() as u32);

        // Ascending map, materialized most recent day first.
        let mut history: Vec<MealDayResult> = daily
            .iter()
            .map(|(&day, entry)| MealDayResult {
                date: calendar::format_day(day),
                meals: meals
                    .iter()
                    .filter(|m| m.day == day)
                    .cloned()
                    .map(MealResult::from)
                    .collect(),
                totals: entry.totals,
            })
            .collect();
        history.reverse();

        tracing::debug!(user_id, days = history.len(), "meal history assembled");
        Ok(MealHistoryResult {
            history,
            period_stats: MealPeriodStats {
                total_days: stats.days_logged,
                average_calories: stats.average_calories,
                average_protein: stats.average_protein,
                average_carbs: stats.average_carbs,
                average_fat: stats.average_fat,
                total_calories: stats.total_calories,
            },
        })
    }

    pub async fn get_meal_stats(
        &self,
        user_id: &str,
        period: StatsPeriod,
    ) -> TrackerResult<MealStatsResult> {
        counter!("tracker_requests_total", "op" => "get_meal_stats").increment(1);
        let window = DateWindow::period_ending(self.clock.today(), period);
        let meals = self.meals.meal_history(user_id, window).await?;
        let daily = aggregate::group_meals_by_day(&meals);
        let stats = aggregate::aggregate_nutrition(&daily, meals.len() as u32);

        tracing::debug!(user_id, period = period.as_str(), "meal stats computed");
        Ok(MealStatsResult {
            period,
            stats: stats.into(),
        })
    }

    /// Today's meals with running totals, the effective goals, and what is
    /// left of each target.
    pub async fn get_today_meals(&self, user_id: &str) -> TrackerResult<TodayMealsResult> {
        counter!("tracker_requests_total", "op" => "get_today_meals").increment(1);
        let today = self.clock.today();
        let meals = self.meals.meals_for_day(user_id, today).await?;

        let mut totals = NutritionTotals::default();
        for meal in &meals {
            totals.accumulate(&meal.totals);
        }

        let goals = self
            .goals
            .nutrition_goals(user_id)
            .await?
            .unwrap_or(self.config.default_nutrition_goals)
            .as_totals();
        let remaining = progress::remaining(&totals, &goals);

        Ok(TodayMealsResult {
            date: calendar::format_day(today),
            meals: meals.into_iter().map(MealResult::from).collect(),
            totals,
            goals,
            remaining,
        })
    }
}

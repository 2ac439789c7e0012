//! Step tracking use-cases.

use metrics::counter;

use stridelog_engine::window::{DateWindow, SpanPolicy, resolve};
use stridelog_engine::{
    DailySteps, EngineError, NewDailySteps, StatsPeriod, StepsPatch, aggregate, calendar,
    progress, series, streak,
};

use crate::error::TrackerResult;
use crate::types::{
    HistoryParams, LogStepsParams, StepsEntryResult, StepsHistoryResult, StepsStatsResult,
    TodayStepsResult, UpdateStepsParams,
};
use crate::{Tracker, TrackerError};

const MAX_HISTORY_LIMIT: u32 = 90;
const DEFAULT_HISTORY_LIMIT: u32 = 30;

const MAX_STEPS: i64 = 100_000;
const MAX_DISTANCE_KM: f64 = 200.0;
const MAX_CALORIES_BURNED: f64 = 10_000.0;

fn validated_steps(raw: i64) -> Result<u32, EngineError> {
    if !(0..=MAX_STEPS).contains(&raw) {
        return Err(EngineError::InvalidMetric(format!(
            "steps must be between 0 and {MAX_STEPS}, got {raw}"
        )));
    }
    Ok(raw as u32)
}

fn validated_distance(raw: f64) -> Result<f64, EngineError> {
    if !(0.0..=MAX_DISTANCE_KM).contains(&raw) {
        return Err(EngineError::InvalidMetric(format!(
            "distance_km must be between 0 and {MAX_DISTANCE_KM}, got {raw}"
        )));
    }
    Ok(raw)
}

fn validated_calories(raw: f64) -> Result<f64, EngineError> {
    if !(0.0..=MAX_CALORIES_BURNED).contains(&raw) {
        return Err(EngineError::InvalidMetric(format!(
            "calories_burned must be between 0 and {MAX_CALORIES_BURNED}, got {raw}"
        )));
    }
    Ok(raw)
}

impl Tracker {
    /// Record (or overwrite) one day of step activity. Distance and calorie
    /// burn are derived from the step count when not supplied.
    pub async fn log_steps(&self, params: LogStepsParams) -> TrackerResult<StepsEntryResult> {
        counter!("tracker_requests_total", "op" => "log_steps").increment(1);
        let day = self.validated_log_day(&params.date)?;
        let steps = validated_steps(params.steps)?;
        let distance_km = match params.distance_km {
            Some(raw) => validated_distance(raw)?,
            None => progress::distance_for_steps(steps),
        };
        let calories_burned = match params.calories_burned {
            Some(raw) => validated_calories(raw)?,
            None => progress::calories_for_steps(steps),
        };

        let stored = self
            .steps
            .upsert_steps(NewDailySteps {
                user_id: params.user_id.clone(),
                day,
                steps,
                distance_km,
                calories_burned,
            })
            .await?;
        tracing::info!(user_id = %params.user_id, day = %day, steps, "logged steps");
        Ok(stored.into())
    }

    pub async fn update_steps(
        &self,
        id: &str,
        user_id: &str,
        params: UpdateStepsParams,
    ) -> TrackerResult<StepsEntryResult> {
        counter!("tracker_requests_total", "op" => "update_steps").increment(1);
        if params.steps.is_none() && params.distance_km.is_none() && params.calories_burned.is_none()
        {
            return Err(TrackerError::Validation(
                "at least one field must be provided for update".into(),
            ));
        }

        let mut patch = StepsPatch {
            steps: params.steps.map(validated_steps).transpose()?,
            distance_km: params.distance_km.map(validated_distance).transpose()?,
            calories_burned: params.calories_burned.map(validated_calories).transpose()?,
        };
        // A changed step count re-derives whatever the caller left out.
        if let Some(steps) = patch.steps {
            if patch.distance_km.is_none() {
                patch.distance_km = Some(progress::distance_for_steps(steps));
            }
            if patch.calories_burned.is_none() {
                patch.calories_burned = Some(progress::calories_for_steps(steps));
            }
        }

        let updated = self.steps.update_steps(id, user_id, patch).await?;
        tracing::info!(user_id, id, "updated steps entry");
        Ok(updated.into())
    }

    pub async fn delete_steps(&self, id: &str, user_id: &str) -> TrackerResult<()> {
        counter!("tracker_requests_total", "op" => "delete_steps").increment(1);
        self.steps.delete_steps(id, user_id).await?;
        tracing::info!(user_id, id, "deleted steps entry");
        Ok(())
    }

    /// Day-by-day history, gap-filled so every day in the window is present,
    /// most recent first, truncated to the caller's limit.
    pub async fn get_steps_history(
        &self,
        user_id: &str,
        params: HistoryParams,
    ) -> TrackerResult<StepsHistoryResult> {
        counter!("tracker_requests_total", "op" => "get_steps_history").increment(1);
        let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        if limit == 0 {
            return Err(TrackerError::Validation(
                "limit must be between 1 and 90".into(),
            ));
        }
        let limit = limit.min(MAX_HISTORY_LIMIT);

        let window = resolve(
            params.start_date.as_deref(),
            params.end_date.as_deref(),
            self.clock.today(),
            self.config.history_lookback_days,
            SpanPolicy::Clamp {
                limit: limit as i64,
            },
        )?;

        let sparse = self.steps.steps_history(user_id, window).await?;
        let mut dense = series::fill_gaps(&sparse, window, user_id);
        dense.truncate(limit as usize);

        let total_days = dense.len() as u32;
        let total_steps: u64 = dense.iter().map(|e| e.steps as u64).sum();
        let average_steps = if total_days > 0 {
            (total_steps as f64 / total_days as f64).round() as u32
        } else {
            0
        };
        tracing::debug!(user_id, days = total_days, "steps history assembled");

        Ok(StepsHistoryResult {
            history: dense.into_iter().map(StepsEntryResult::from).collect(),
            total_days,
            total_steps,
            average_steps,
        })
    }

    /// Aggregated statistics for a named period. The streak is computed over
    /// a 90-day lookback no matter which period was requested.
    pub async fn get_steps_stats(
        &self,
        user_id: &str,
        period: StatsPeriod,
    ) -> TrackerResult<StepsStatsResult> {
        counter!("tracker_requests_total", "op" => "get_steps_stats").increment(1);
        let today = self.clock.today();
        let window = DateWindow::period_ending(today, period);
        let history = self.steps.steps_history(user_id, window).await?;

        let goal = self
            .goals
            .steps_goal(user_id)
            .await?
            .unwrap_or(self.config.default_steps_goal);
        let mut stats = aggregate::aggregate_steps(&history, period, goal);

        let streak_window = DateWindow::trailing(today, self.config.streak_lookback_days);
        let streak_history = self.steps.steps_history(user_id, streak_window).await?;
        stats.current_streak = streak::current_streak(&streak_history, today);

        tracing::debug!(user_id, period = period.as_str(), "steps stats computed");
        Ok(StepsStatsResult {
            period,
            stats: stats.into(),
        })
    }

    /// Today's entry (or a zero placeholder) plus progress against the step
    /// goal.
    pub async fn get_today_steps(&self, user_id: &str) -> TrackerResult<TodayStepsResult> {
        counter!("tracker_requests_total", "op" => "get_today_steps").increment(1);
        let today = self.clock.today();
        let entry = self
            .steps
            .steps_for_day(user_id, today)
            .await?
            .unwrap_or_else(|| DailySteps::synthetic(user_id, today));

        let goal = self
            .goals
            .steps_goal(user_id)
            .await?
            .unwrap_or(self.config.default_steps_goal);
        let p = progress::goal_progress(entry.steps as f64, goal as f64);

        Ok(TodayStepsResult {
            id: entry.id,
            date: calendar::format_day(today),
            steps: entry.steps,
            distance_km: entry.distance_km,
            calories_burned: entry.calories_burned,
            goal_steps: goal,
            goal_progress: p.percent,
            goal_reached: p.reached,
        })
    }
}

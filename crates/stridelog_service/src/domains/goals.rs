//! Nutrition goal use-cases.

use metrics::counter;

use stridelog_engine::NutritionGoals;

use crate::error::TrackerResult;
use crate::types::{NutritionGoalsResult, SetNutritionGoalsParams};
use crate::{Tracker, TrackerError};

impl Tracker {
    /// The user's stored goals, or the configured defaults when none exist.
    pub async fn get_nutrition_goals(&self, user_id: &str) -> TrackerResult<NutritionGoalsResult> {
        counter!("tracker_requests_total", "op" => "get_nutrition_goals").increment(1);
        match self.goals.nutrition_goals(user_id).await? {
            Some(goals) => Ok(NutritionGoalsResult {
                goals,
                is_default: false,
            }),
            None => Ok(NutritionGoalsResult {
                goals: self.config.default_nutrition_goals,
                is_default: true,
            }),
        }
    }

    pub async fn set_nutrition_goals(
        &self,
        params: SetNutritionGoalsParams,
    ) -> TrackerResult<NutritionGoalsResult> {
        counter!("tracker_requests_total", "op" => "set_nutrition_goals").increment(1);
        for (name, value) in [
            ("daily_calories", params.daily_calories),
            ("daily_protein", params.daily_protein),
            ("daily_carbs", params.daily_carbs),
            ("daily_fat", params.daily_fat),
        ] {
            if value <= 0.0 {
                return Err(TrackerError::Validation(format!(
                    "{name} must be positive"
                )));
            }
        }

        let stored = self
            .goals
            .set_nutrition_goals(
                &params.user_id,
                NutritionGoals {
                    daily_calories: params.daily_calories,
                    daily_protein: params.daily_protein,
                    daily_carbs: params.daily_carbs,
                    daily_fat: params.daily_fat,
                },
            )
            .await?;
        tracing::info!(user_id = %params.user_id, "nutrition goals updated");
        Ok(NutritionGoalsResult {
            goals: stored,
            is_default: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::seeded_tracker;
    use crate::types::SetNutritionGoalsParams;
    use crate::TrackerError;

    #[tokio::test]
    async fn defaults_apply_until_goals_are_set() {
        let (tracker, _store) = seeded_tracker("2026-03-15").await;
        let out = tracker.get_nutrition_goals("u1").await.expect("goals");
        assert!(out.is_default);
        assert_eq!(out.goals.daily_calories, 2000.0);
        assert_eq!(out.goals.daily_protein, 150.0);
        assert_eq!(out.goals.daily_carbs, 250.0);
        assert_eq!(out.goals.daily_fat, 65.0);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let (tracker, _store) = seeded_tracker("2026-03-15").await;
        let set = tracker
            .set_nutrition_goals(SetNutritionGoalsParams {
                user_id: "u1".into(),
                daily_calories: 1800.0,
                daily_protein: 120.0,
                daily_carbs: 180.0,
                daily_fat: 55.0,
            })
            .await
            .expect("set");
        assert!(!set.is_default);

        let got = tracker.get_nutrition_goals("u1").await.expect("get");
        assert!(!got.is_default);
        assert_eq!(got.goals.daily_calories, 1800.0);
    }

    #[tokio::test]
    async fn non_positive_goals_are_rejected() {
        let (tracker, _store) = seeded_tracker("2026-03-15").await;
        let err = tracker
            .set_nutrition_goals(SetNutritionGoalsParams {
                user_id: "u1".into(),
                daily_calories: 0.0,
                daily_protein: 120.0,
                daily_carbs: 180.0,
                daily_fat: 55.0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
    }
}

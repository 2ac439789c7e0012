//! In-process store backed by plain maps. Serves as the bundled concrete
//! provider implementation for tests, demos, and single-process deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::window::DateWindow;
use crate::{
    DailySteps, EngineError, EngineResult, GoalStore, Meal, MealPatch, MealStore, NewDailySteps,
    NewMeal, NutritionGoals, StepsPatch, StepsStore,
};

#[derive(Default)]
struct Inner {
    steps: Vec<DailySteps>,
    meals: Vec<Meal>,
    nutrition_goals: HashMap<String, NutritionGoals>,
    steps_goals: HashMap<String, u32>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test/demo hook; there is no engine-level steps-goal setter contract.
    pub async fn set_steps_goal(&self, user_id: &str, goal: u32) {
        let mut inner = self.inner.lock().await;
        inner.steps_goals.insert(user_id.to_string(), goal);
    }
}

#[async_trait]
impl StepsStore for MemoryStore {
    async fn steps_history(
        &self,
        user_id: &str,
        window: DateWindow,
    ) -> EngineResult<Vec<DailySteps>> {
        let inner = self.inner.lock().await;
        let mut out: Vec<DailySteps> = inner
            .steps
            .iter()
            .filter(|e| e.user_id == user_id && window.contains(e.day))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.day.cmp(&a.day));
        Ok(out)
    }

    async fn steps_for_day(
        &self,
        user_id: &str,
        day: NaiveDate,
    ) -> EngineResult<Option<DailySteps>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .steps
            .iter()
            .find(|e| e.user_id == user_id && e.day == day)
            .cloned())
    }

    async fn upsert_steps(&self, entry: NewDailySteps) -> EngineResult<DailySteps> {
        let mut inner = self.inner.lock().await;
        if let Some(existing) = inner
            .steps
            .iter_mut()
            .find(|e| e.user_id == entry.user_id && e.day == entry.day)
        {
            existing.steps = entry.steps;
            existing.distance_km = entry.distance_km;
            existing.calories_burned = entry.calories_burned;
            return Ok(existing.clone());
        }
        let stored = DailySteps {
            id: Some(Uuid::new_v4().to_string()),
            user_id: entry.user_id,
            day: entry.day,
            steps: entry.steps,
            distance_km: entry.distance_km,
            calories_burned: entry.calories_burned,
        };
        inner.steps.push(stored.clone());
        Ok(stored)
    }

    async fn update_steps(
        &self,
        id: &str,
        user_id: &str,
        patch: StepsPatch,
    ) -> EngineResult<DailySteps> {
        let mut inner = self.inner.lock().await;
        let entry = inner
            .steps
            .iter_mut()
            .find(|e| e.id.as_deref() == Some(id) && e.user_id == user_id)
            .ok_or_else(|| EngineError::NotFound(format!("steps entry {id}")))?;
        if let Some(steps) = patch.steps {
            entry.steps = steps;
        }
        if let Some(distance) = patch.distance_km {
            entry.distance_km = distance;
        }
        if let Some(calories) = patch.calories_burned {
            entry.calories_burned = calories;
        }
        Ok(entry.clone())
    }

    async fn delete_steps(&self, id: &str, user_id: &str) -> EngineResult<()> {
        let mut inner = self.inner.lock().await;
        let before = inner.steps.len();
        inner
            .steps
            .retain(|e| !(e.id.as_deref() == Some(id) && e.user_id == user_id));
        if inner.steps.len() == before {
            return Err(EngineError::NotFound(format!("steps entry {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl MealStore for MemoryStore {
    async fn meal_history(&self, user_id: &str, window: DateWindow) -> EngineResult<Vec<Meal>> {
        let inner = self.inner.lock().await;
        let mut out: Vec<Meal> = inner
            .meals
            .iter()
            .filter(|m| m.user_id == user_id && window.contains(m.day))
            .cloned()
            .collect();
        // Stable sort keeps same-day meals in insertion order.
        out.sort_by(|a, b| b.day.cmp(&a.day));
        Ok(out)
    }

    async fn meals_for_day(&self, user_id: &str, day: NaiveDate) -> EngineResult<Vec<Meal>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .meals
            .iter()
            .filter(|m| m.user_id == user_id && m.day == day)
            .cloned()
            .collect())
    }

    async fn meal_by_id(&self, id: &str, user_id: &str) -> EngineResult<Option<Meal>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .meals
            .iter()
            .find(|m| m.id == id && m.user_id == user_id)
            .cloned())
    }

    async fn create_meal(&self, meal: NewMeal) -> EngineResult<Meal> {
        let mut inner = self.inner.lock().await;
        let stored = Meal {
            id: Uuid::new_v4().to_string(),
            user_id: meal.user_id,
            meal_type: meal.meal_type,
            day: meal.day,
            totals: meal.totals,
            foods: meal.foods,
            notes: meal.notes,
        };
        inner.meals.push(stored.clone());
        Ok(stored)
    }

    async fn update_meal(&self, id: &str, user_id: &str, patch: MealPatch) -> EngineResult<Meal> {
        let mut inner = self.inner.lock().await;
        let meal = inner
            .meals
            .iter_mut()
            .find(|m| m.id == id && m.user_id == user_id)
            .ok_or_else(|| EngineError::NotFound(format!("meal {id}")))?;
        if let Some(meal_type) = patch.meal_type {
            meal.meal_type = meal_type;
        }
        if let Some(totals) = patch.totals {
            meal.totals = totals;
        }
        if let Some(foods) = patch.foods {
            meal.foods = foods;
        }
        if let Some(notes) = patch.notes {
            meal.notes = Some(notes);
        }
        Ok(meal.clone())
    }

    async fn delete_meal(&self, id: &str, user_id: &str) -> EngineResult<()> {
        let mut inner = self.inner.lock().await;
        let before = inner.meals.len();
        inner.meals.retain(|m| !(m.id == id && m.user_id == user_id));
        if inner.meals.len() == before {
            return Err(EngineError::NotFound(format!("meal {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl GoalStore for MemoryStore {
    async fn nutrition_goals(&self, user_id: &str) -> EngineResult<Option<NutritionGoals>> {
        let inner = self.inner.lock().await;
        Ok(inner.nutrition_goals.get(user_id).copied())
    }

    async fn set_nutrition_goals(
        &self,
        user_id: &str,
        goals: NutritionGoals,
    ) -> EngineResult<NutritionGoals> {
        let mut inner = self.inner.lock().await;
        inner.nutrition_goals.insert(user_id.to_string(), goals);
        Ok(goals)
    }

    async fn steps_goal(&self, user_id: &str) -> EngineResult<Option<u32>> {
        let inner = self.inner.lock().await;
        Ok(inner.steps_goals.get(user_id).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn new_entry(day: &str, steps: u32) -> NewDailySteps {
        NewDailySteps {
            user_id: "u1".into(),
            day: d(day),
            steps,
            distance_km: steps as f64 * 0.0008,
            calories_burned: steps as f64 * 0.04,
        }
    }

    #[tokio::test]
    async fn upsert_replaces_the_same_day() {
        let store = MemoryStore::new();
        let first = store.upsert_steps(new_entry("2026-03-10", 4000)).await.unwrap();
        let second = store.upsert_steps(new_entry("2026-03-10", 9000)).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.steps, 9000);

        let window = DateWindow::single(d("2026-03-10"));
        let history = store.steps_history("u1", window).await.unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn history_is_windowed_per_user_and_descending() {
        let store = MemoryStore::new();
        store.upsert_steps(new_entry("2026-03-08", 100)).await.unwrap();
        store.upsert_steps(new_entry("2026-03-10", 300)).await.unwrap();
        store.upsert_steps(new_entry("2026-03-09", 200)).await.unwrap();
        store
            .upsert_steps(NewDailySteps {
                user_id: "someone-else".into(),
                ..new_entry("2026-03-09", 999)
            })
            .await
            .unwrap();

        let window = DateWindow::new(d("2026-03-09"), d("2026-03-11")).unwrap();
        let history = store.steps_history("u1", window).await.unwrap();
        let days: Vec<_> = history.iter().map(|e| e.day).collect();
        assert_eq!(days, vec![d("2026-03-10"), d("2026-03-09")]);
    }

    #[tokio::test]
    async fn update_patches_only_provided_fields() {
        let store = MemoryStore::new();
        let created = store.upsert_steps(new_entry("2026-03-10", 4000)).await.unwrap();
        let id = created.id.clone().unwrap();

        let patched = store
            .update_steps(
                &id,
                "u1",
                StepsPatch {
                    steps: Some(5000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(patched.steps, 5000);
        assert_eq!(patched.distance_km, created.distance_km);
    }

    #[tokio::test]
    async fn missing_ids_surface_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.delete_steps("nope", "u1").await,
            Err(EngineError::NotFound(_))
        ));
        assert!(matches!(
            store.update_steps("nope", "u1", StepsPatch::default()).await,
            Err(EngineError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_meal("nope", "u1").await,
            Err(EngineError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn goals_round_trip() {
        let store = MemoryStore::new();
        assert!(store.nutrition_goals("u1").await.unwrap().is_none());
        assert!(store.steps_goal("u1").await.unwrap().is_none());

        let goals = NutritionGoals {
            daily_calories: 1800.0,
            daily_protein: 140.0,
            daily_carbs: 200.0,
            daily_fat: 60.0,
        };
        store.set_nutrition_goals("u1", goals).await.unwrap();
        assert_eq!(store.nutrition_goals("u1").await.unwrap(), Some(goals));

        store.set_steps_goal("u1", 12_000).await;
        assert_eq!(store.steps_goal("u1").await.unwrap(), Some(12_000));
    }
}

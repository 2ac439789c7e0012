//! Shared fixtures for unit tests: a frozen clock, a seeded tracker, and
//! quick record builders.
#![cfg(test)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use stridelog_engine::calendar::FixedClock;
use stridelog_engine::memory::MemoryStore;
use stridelog_engine::{
    MealFood, MealStore, MealType, NewDailySteps, NewMeal, NutritionTotals, StepsStore, progress,
};

use crate::Tracker;

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

/// Tracker over a fresh in-memory store with "today" frozen at `today`.
pub async fn seeded_tracker(today: &str) -> (Tracker, Arc<MemoryStore>) {
    let (tracker, store) = Tracker::in_memory();
    let tracker = tracker.with_clock(Arc::new(FixedClock(d(today))));
    (tracker, store)
}

pub fn food(name: &str, calories: f64) -> MealFood {
    MealFood {
        food_id: None,
        food_name: name.into(),
        brand_name: None,
        serving_size: 100.0,
        serving_unit: "g".into(),
        calories,
        protein: calories / 20.0,
        carbs: calories / 10.0,
        fat: calories / 40.0,
    }
}

/// Direct store seeding, bypassing use-case validation (e.g. for days past
/// the backfill limit).
#[async_trait]
pub trait SeedStore {
    async fn seed_steps(&self, user_id: &str, day: &str, steps: u32);
    async fn seed_meal(&self, user_id: &str, day: &str, calories: f64);
}

#[async_trait]
impl SeedStore for MemoryStore {
    async fn seed_steps(&self, user_id: &str, day: &str, steps: u32) {
        self.upsert_steps(NewDailySteps {
            user_id: user_id.into(),
            day: d(day),
            steps,
            distance_km: progress::distance_for_steps(steps),
            calories_burned: progress::calories_for_steps(steps),
        })
        .await
        .expect("seed steps");
    }

    async fn seed_meal(&self, user_id: &str, day: &str, calories: f64) {
        let foods = vec![food("seeded", calories)];
        self.create_meal(NewMeal {
            user_id: user_id.into(),
            meal_type: MealType::Lunch,
            day: d(day),
            totals: NutritionTotals::from_foods(&foods),
            foods,
            notes: None,
        })
        .await
        .expect("seed meal");
    }
}

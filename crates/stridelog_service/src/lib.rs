//! Use-case layer over the tracking engine: steps, meals, and nutrition
//! goals, wired to injected store implementations.

use std::sync::Arc;

use stridelog_engine::calendar::{self, Clock, UtcClock};
use stridelog_engine::config::EngineConfig;
use stridelog_engine::memory::MemoryStore;
use stridelog_engine::{EngineError, GoalStore, MealStore, StepsStore};

pub mod domains;
pub mod error;
pub mod types;

mod test_utils;

pub use error::{TrackerError, TrackerResult};

/// Handle bundling the injected stores, the clock, and engine defaults.
/// Cloning is cheap; every method is a pure request-scoped computation over
/// store snapshots.
#[derive(Clone)]
pub struct Tracker {
    steps: Arc<dyn StepsStore>,
    meals: Arc<dyn MealStore>,
    goals: Arc<dyn GoalStore>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl Tracker {
    pub fn new(
        steps: Arc<dyn StepsStore>,
        meals: Arc<dyn MealStore>,
        goals: Arc<dyn GoalStore>,
    ) -> Self {
        Self {
            steps,
            meals,
            goals,
            clock: Arc::new(UtcClock),
            config: EngineConfig::default(),
        }
    }

    /// All three stores backed by one shared in-memory instance; the store is
    /// returned so callers can seed it directly.
    pub fn in_memory() -> (Self, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let steps: Arc<dyn StepsStore> = store.clone();
        let meals: Arc<dyn MealStore> = store.clone();
        let goals: Arc<dyn GoalStore> = store.clone();
        (Self::new(steps, meals, goals), store)
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse and validate a day that a log operation wants to write to:
    /// must be a real calendar date, not in the future, and not beyond the
    /// backfill limit.
    fn validated_log_day(&self, raw: &str) -> TrackerResult<chrono::NaiveDate> {
        let day = calendar::parse_day(raw)?;
        let today = self.clock.today();
        if calendar::is_future(day, today) {
            return Err(EngineError::FutureDate(day).into());
        }
        if calendar::is_too_old(day, today, self.config.backfill_limit_days) {
            return Err(EngineError::DateTooOld {
                date: day,
                max_days: self.config.backfill_limit_days,
            }
            .into());
        }
        Ok(day)
    }
}

// SPDX-License-Identifier: MIT

//! Local persistence boundary.
//!
//! The presentation layer owns the real database; the sync pipeline only
//! needs the operations in [`LocalStore`]. [`MemoryStore`] is a complete
//! in-memory implementation used by tests and by embedders that have not
//! wired a durable backend yet.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{CardioSession, DailyTask, HealthMetrics, Workout};

/// Fixed keys for the small opaque-blob state the pipeline persists.
pub mod keys {
    /// The workout sync engine's incremental change anchor.
    pub const WORKOUT_ANCHOR: &str = "workout_anchor";
    /// The serialized streak singleton.
    pub const USER_STREAK: &str = "user_streak";
}

/// Durable keyed record storage, organized into entity collections.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Insert or overwrite the metrics record for the record's calendar
    /// day. At most one record exists per day; an overwrite keeps the
    /// existing record's identifier so repeated syncs converge.
    async fn upsert_health_metrics(&self, metrics: HealthMetrics) -> Result<()>;

    async fn health_metrics_for_day(&self, day: NaiveDate) -> Result<Option<HealthMetrics>>;

    async fn insert_workout(&self, workout: Workout) -> Result<()>;

    /// Workouts dated on the given day, newest first.
    async fn workouts_for_day(&self, day: NaiveDate) -> Result<Vec<Workout>>;

    async fn insert_cardio_session(&self, session: CardioSession) -> Result<()>;

    /// Cardio sessions dated on the given day, newest first.
    async fn cardio_sessions_for_day(&self, day: NaiveDate) -> Result<Vec<CardioSession>>;

    /// Insert a task, or overwrite the record with the same id.
    async fn upsert_task(&self, task: DailyTask) -> Result<()>;

    /// Tasks dated on the given day, oldest first.
    async fn tasks_for_day(&self, day: NaiveDate) -> Result<Vec<DailyTask>>;

    /// Read an opaque state blob (anchor, streak) by fixed key.
    async fn read_blob(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write an opaque state blob by fixed key, overwriting any prior value.
    async fn write_blob(&self, key: &str, value: Vec<u8>) -> Result<()>;
}

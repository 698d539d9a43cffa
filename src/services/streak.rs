// SPDX-License-Identifier: MIT

//! Streak engine.
//!
//! Derives the day-activity streak from three local signals: a completed
//! task today, a logged workout today, or a step count at or above the
//! configured threshold. The whole `Streak` record is read, transformed,
//! and written back as one blob under a fixed key; there are no partial
//! updates.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::SyncSettings;
use crate::error::{HealthSyncError, Result};
use crate::models::Streak;
use crate::store::{keys, LocalStore};

/// Computes and persists the activity streak.
pub struct StreakEngine {
    store: Arc<dyn LocalStore>,
    settings: SyncSettings,
}

impl StreakEngine {
    pub fn new(store: Arc<dyn LocalStore>, settings: SyncSettings) -> Self {
        Self { store, settings }
    }

    /// Load the persisted streak, or a fresh one if none exists yet.
    ///
    /// A blob that exists but fails to decode is a loud error, not a
    /// silent fresh start.
    pub async fn current_streak(&self) -> Result<Streak> {
        match self.store.read_blob(keys::USER_STREAK).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| HealthSyncError::CorruptState(format!("streak record: {}", e))),
            None => Ok(Streak::default()),
        }
    }

    /// Re-evaluate the streak against today's activity and persist the
    /// result. Returns the (possibly unchanged) streak.
    pub async fn update_streak(&self) -> Result<Streak> {
        self.update_streak_at(Utc::now()).await
    }

    /// `update_streak` with an injected clock.
    pub async fn update_streak_at(&self, now: DateTime<Utc>) -> Result<Streak> {
        let mut streak = self.current_streak().await?;
        let today = now.date_naive();

        let active_today = self.was_active_on(today).await?;

        if active_today {
            if streak.is_active_on(today) {
                // Already counted today.
                return Ok(streak);
            }

            if streak.is_broken_at(today) {
                streak.reset();
            }

            streak.increment_at(now);
            self.save(&streak).await?;

            tracing::info!(
                current = streak.current_streak,
                longest = streak.longest_streak,
                "Streak extended"
            );
        } else if streak.is_broken_at(today) {
            streak.reset();
            self.save(&streak).await?;

            tracing::info!("Streak broken, reset to zero");
        }

        Ok(streak)
    }

    /// Explicitly reset the streak (keeps the longest-run record).
    pub async fn reset_streak(&self) -> Result<Streak> {
        let mut streak = self.current_streak().await?;
        streak.reset();
        self.save(&streak).await?;
        Ok(streak)
    }

    /// The activity signal: any completed task, any logged workout, or a
    /// step count at or above the threshold, all for the given day.
    async fn was_active_on(&self, day: chrono::NaiveDate) -> Result<bool> {
        let tasks = self.store.tasks_for_day(day).await?;
        if tasks.iter().any(|t| t.is_completed) {
            return Ok(true);
        }

        let workouts = self.store.workouts_for_day(day).await?;
        if !workouts.is_empty() {
            return Ok(true);
        }

        let metrics = self.store.health_metrics_for_day(day).await?;
        Ok(metrics.is_some_and(|m| m.steps >= self.settings.step_activity_threshold))
    }

    async fn save(&self, streak: &Streak) -> Result<()> {
        let bytes = serde_json::to_vec(streak)
            .map_err(|e| HealthSyncError::CorruptState(format!("streak encode: {}", e)))?;
        self.store.write_blob(keys::USER_STREAK, bytes).await
    }
}

// SPDX-License-Identifier: MIT

//! In-memory `LocalStore` implementation backed by concurrent maps.

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{CardioSession, DailyTask, HealthMetrics, Workout};
use crate::store::LocalStore;

/// Process-lifetime store. Every collection is a keyed concurrent map,
/// so reads and writes never block the async runtime.
#[derive(Default)]
pub struct MemoryStore {
    metrics: DashMap<NaiveDate, HealthMetrics>,
    workouts: DashMap<Uuid, Workout>,
    cardio_sessions: DashMap<Uuid, CardioSession>,
    tasks: DashMap<Uuid, DailyTask>,
    blobs: DashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total persisted workout count, across all days.
    pub fn workout_count(&self) -> usize {
        self.workouts.len()
    }

    /// Total persisted cardio session count, across all days.
    pub fn cardio_session_count(&self) -> usize {
        self.cardio_sessions.len()
    }

    /// Number of per-day metrics records.
    pub fn metrics_day_count(&self) -> usize {
        self.metrics.len()
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    async fn upsert_health_metrics(&self, metrics: HealthMetrics) -> Result<()> {
        let day = metrics.day();

        match self.metrics.get_mut(&day) {
            Some(mut existing) => {
                // Overwrite in place, keeping the original record id.
                let id = existing.id;
                *existing = metrics;
                existing.id = id;
            }
            None => {
                self.metrics.insert(day, metrics);
            }
        }

        Ok(())
    }

    async fn health_metrics_for_day(&self, day: NaiveDate) -> Result<Option<HealthMetrics>> {
        Ok(self.metrics.get(&day).map(|entry| entry.value().clone()))
    }

    async fn insert_workout(&self, workout: Workout) -> Result<()> {
        self.workouts.insert(workout.id, workout);
        Ok(())
    }

    async fn workouts_for_day(&self, day: NaiveDate) -> Result<Vec<Workout>> {
        let mut matched: Vec<Workout> = self
            .workouts
            .iter()
            .filter(|entry| entry.is_on(day))
            .map(|entry| entry.value().clone())
            .collect();
        matched.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(matched)
    }

    async fn insert_cardio_session(&self, session: CardioSession) -> Result<()> {
        self.cardio_sessions.insert(session.id, session);
        Ok(())
    }

    async fn cardio_sessions_for_day(&self, day: NaiveDate) -> Result<Vec<CardioSession>> {
        let mut matched: Vec<CardioSession> = self
            .cardio_sessions
            .iter()
            .filter(|entry| entry.is_on(day))
            .map(|entry| entry.value().clone())
            .collect();
        matched.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(matched)
    }

    async fn upsert_task(&self, task: DailyTask) -> Result<()> {
        self.tasks.insert(task.id, task);
        Ok(())
    }

    async fn tasks_for_day(&self, day: NaiveDate) -> Result<Vec<DailyTask>> {
        let mut matched: Vec<DailyTask> = self
            .tasks
            .iter()
            .filter(|entry| entry.is_on(day))
            .map(|entry| entry.value().clone())
            .collect();
        matched.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(matched)
    }

    async fn read_blob(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.blobs.get(key).map(|entry| entry.value().clone()))
    }

    async fn write_blob(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.blobs.insert(key.to_string(), value);
        Ok(())
    }
}

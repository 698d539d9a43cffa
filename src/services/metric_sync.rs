// SPDX-License-Identifier: MIT

//! Daily metrics sync engine.
//!
//! Pulls today's cumulative activity metrics from the health source and
//! upserts one `HealthMetrics` record keyed by calendar day. Required
//! metrics (steps, distance, calories, active minutes) abort the sync on
//! failure; optional metrics (heart rate, flights) degrade to absent.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{HealthSyncError, Result};
use crate::health::{HealthSource, MetricKind};
use crate::models::{HealthMetrics, MetricSource, METERS_PER_MILE};
use crate::store::LocalStore;
use crate::time_utils::start_of_day;

/// Pulls platform metrics into the local store.
pub struct MetricSyncEngine {
    source: Arc<dyn HealthSource>,
    store: Arc<dyn LocalStore>,
}

impl MetricSyncEngine {
    pub fn new(source: Arc<dyn HealthSource>, store: Arc<dyn LocalStore>) -> Self {
        Self { source, store }
    }

    /// Sync today's metrics over the window `[start of today, now)`.
    ///
    /// Exactly one store upsert per call; repeated calls within a day
    /// converge to the latest pulled values.
    pub async fn sync_today_metrics(&self) -> Result<HealthMetrics> {
        if !self.source.is_available() {
            return Err(HealthSyncError::SourceUnavailable);
        }

        let now = Utc::now();
        let start = start_of_day(now);

        tracing::info!("Starting daily metrics sync");

        // Required metrics. Basal energy tolerates NoData (total falls
        // back to active alone); everything else aborts the sync.
        let (steps, distance_meters, active_kcal, exercise_secs, basal_kcal) = tokio::try_join!(
            self.source.cumulative_sum(MetricKind::Steps, start, now),
            self.source.cumulative_sum(MetricKind::Distance, start, now),
            self.source.cumulative_sum(MetricKind::ActiveEnergy, start, now),
            self.source.cumulative_sum(MetricKind::ExerciseTime, start, now),
            self.fetch_basal(start, now),
        )?;

        // Optional metrics: failures degrade to absent values.
        let (average_heart_rate, resting_heart_rate, max_heart_rate) =
            match self.fetch_heart_rate(start, now).await {
                Ok(rates) => rates,
                Err(e) => {
                    tracing::warn!(error = %e, "Heart rate not available");
                    (None, None, None)
                }
            };

        let flights_climbed = match self.fetch_flights(start, now).await {
            Ok(flights) => flights,
            Err(e) => {
                tracing::warn!(error = %e, "Flights data not available");
                None
            }
        };

        // Keep the existing record's identifier so repeated syncs within
        // a day overwrite one record instead of minting new identities.
        let id = self
            .store
            .health_metrics_for_day(now.date_naive())
            .await?
            .map(|existing| existing.id)
            .unwrap_or_else(Uuid::new_v4);

        let active_calories = active_kcal as u32;
        let metrics = HealthMetrics {
            id,
            date: now,
            steps: steps as u32,
            distance_miles: distance_meters / METERS_PER_MILE,
            active_calories,
            total_calories: active_calories + basal_kcal as u32,
            active_minutes: (exercise_secs / 60.0) as u32,
            average_heart_rate,
            resting_heart_rate,
            max_heart_rate,
            flights_climbed,
            last_synced: now,
            source: MetricSource::PlatformHealth,
        };

        self.store.upsert_health_metrics(metrics.clone()).await?;

        tracing::info!(
            steps = metrics.steps,
            active_calories = metrics.active_calories,
            active_minutes = metrics.active_minutes,
            "Daily metrics sync complete"
        );

        Ok(metrics)
    }

    /// Basal energy, treating "no data" as zero so the total falls back
    /// to active energy alone.
    async fn fetch_basal(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<f64> {
        match self
            .source
            .cumulative_sum(MetricKind::BasalEnergy, start, end)
            .await
        {
            Ok(kcal) => Ok(kcal),
            Err(HealthSyncError::NoData) => Ok(0.0),
            Err(e) => Err(e),
        }
    }

    /// Average/resting/max heart rate over the window.
    ///
    /// Average and max come from the raw sample set; resting comes from
    /// a separate query, taking the most recent sample. All three are
    /// absent when no samples exist.
    async fn fetch_heart_rate(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(Option<u32>, Option<u32>, Option<u32>)> {
        let samples = self
            .source
            .samples(MetricKind::HeartRate, start, end)
            .await?;

        if samples.is_empty() {
            return Ok((None, None, None));
        }

        let sum: f64 = samples.iter().map(|s| s.value).sum();
        let average = Some((sum / samples.len() as f64) as u32);
        let max = samples
            .iter()
            .map(|s| s.value)
            .fold(f64::MIN, f64::max);
        let max = Some(max as u32);

        let resting = self
            .source
            .samples(MetricKind::RestingHeartRate, start, end)
            .await?
            .first()
            .map(|s| s.value as u32);

        Ok((average, resting, max))
    }

    /// Flights climbed; zero and "no data" both resolve to absent.
    async fn fetch_flights(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<u32>> {
        match self
            .source
            .cumulative_sum(MetricKind::FlightsClimbed, start, end)
            .await
        {
            Ok(value) if value > 0.0 => Ok(Some(value as u32)),
            Ok(_) => Ok(None),
            Err(HealthSyncError::NoData) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

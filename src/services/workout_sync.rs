// SPDX-License-Identifier: MIT

//! Workout sync engine with review staging.
//!
//! New workouts from the health source are never written to the local
//! store directly. They are converted into `WorkoutReviewItem`s and held
//! for explicit user approval; only approval commits a record.
//!
//! Incremental fetches ride on a persisted change anchor. The anchor is
//! advanced and stored before converted items are returned, so workouts
//! are delivered at most once through the incremental path; the bounded
//! time-range scan is the recovery mechanism when staged items are lost
//! before the user acts on them.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::{HealthSyncError, Result};
use crate::health::{AnchorToken, ExternalWorkout, HealthSource};
use crate::models::{WorkoutReviewItem, WorkoutType, METERS_PER_MILE};
use crate::store::{keys, LocalStore};

/// Stages platform workouts for review and commits approved ones.
pub struct WorkoutSyncEngine {
    source: Arc<dyn HealthSource>,
    store: Arc<dyn LocalStore>,
}

impl WorkoutSyncEngine {
    pub fn new(source: Arc<dyn HealthSource>, store: Arc<dyn LocalStore>) -> Self {
        Self { source, store }
    }

    /// Fetch workouts created or changed since the last successful call.
    ///
    /// The advanced anchor is persisted before items are returned, so a
    /// caller failure after this returns will not re-deliver these items
    /// on the next call.
    pub async fn fetch_new_workouts(&self) -> Result<Vec<WorkoutReviewItem>> {
        let anchor = self.load_anchor().await?;

        let (records, new_anchor) = self.source.incremental_workouts(anchor.as_ref()).await?;
        self.store_anchor(&new_anchor).await?;

        let detected_at = Utc::now();
        let items: Vec<WorkoutReviewItem> = records
            .iter()
            .filter_map(|raw| convert_to_review_item(raw, detected_at))
            .collect();

        tracing::info!(
            fetched = records.len(),
            staged = items.len(),
            "Incremental workout fetch complete"
        );

        Ok(items)
    }

    /// Fetch workouts from the last `days` days, ignoring the anchor.
    ///
    /// Idempotent; may return items already seen through the incremental
    /// path. De-duplication against the review queue is the caller's
    /// concern.
    pub async fn fetch_recent_workouts(&self, days: u32) -> Result<Vec<WorkoutReviewItem>> {
        let end = Utc::now();
        let start = end - Duration::days(i64::from(days));

        let records = self.source.workouts_between(start, end).await?;

        let detected_at = Utc::now();
        let items: Vec<WorkoutReviewItem> = records
            .iter()
            .filter_map(|raw| convert_to_review_item(raw, detected_at))
            .collect();

        tracing::info!(days, staged = items.len(), "Recent workout fetch complete");

        Ok(items)
    }

    /// Commit a reviewed item to the local store.
    ///
    /// Cardio-classified, distance-bearing items become cardio sessions;
    /// everything else becomes an approved workout. Each approval is a
    /// brand-new insert, never an update.
    pub async fn approve(&self, item: &WorkoutReviewItem) -> Result<()> {
        let now = Utc::now();

        if item.is_cardio() && item.distance_miles.is_some() {
            if let Some(session) = item.to_cardio_session(now) {
                self.store.insert_cardio_session(session).await?;
                tracing::info!(
                    workout_type = ?item.workout_type,
                    "Approved cardio workout"
                );
                return Ok(());
            }
        }

        self.store.insert_workout(item.to_workout(now)).await?;
        tracing::info!(workout_type = ?item.workout_type, "Approved workout");
        Ok(())
    }

    /// Discard a reviewed item. The store is untouched and the anchor
    /// (already advanced at fetch time) is not rolled back, so the item
    /// will not reappear through the incremental path.
    pub fn ignore(&self, item: &WorkoutReviewItem) {
        tracing::info!(workout_type = ?item.workout_type, "Ignored workout");
    }

    // ─── Anchor Persistence ──────────────────────────────────────────

    async fn load_anchor(&self) -> Result<Option<AnchorToken>> {
        match self.store.read_blob(keys::WORKOUT_ANCHOR).await? {
            Some(bytes) => {
                let token = String::from_utf8(bytes).map_err(|e| {
                    HealthSyncError::CorruptState(format!("workout anchor: {}", e))
                })?;
                Ok(Some(AnchorToken(token)))
            }
            None => Ok(None),
        }
    }

    async fn store_anchor(&self, anchor: &AnchorToken) -> Result<()> {
        self.store
            .write_blob(keys::WORKOUT_ANCHOR, anchor.0.clone().into_bytes())
            .await
    }
}

/// Map the source's activity-type name onto the domain taxonomy.
///
/// Types with no entry are unsupported and get dropped at conversion.
pub(crate) fn map_activity_type(activity_type: &str) -> Option<WorkoutType> {
    match activity_type {
        "running" => Some(WorkoutType::Running),
        "walking" => Some(WorkoutType::Walking),
        "cycling" => Some(WorkoutType::Cycling),
        "swimming" => Some(WorkoutType::Swimming),
        "hiking" => Some(WorkoutType::Hiking),
        "stair_climbing" => Some(WorkoutType::StairClimbing),
        "rowing" => Some(WorkoutType::Rowing),
        "elliptical" => Some(WorkoutType::Elliptical),
        "traditional_strength_training" | "functional_strength_training" => {
            Some(WorkoutType::Strength)
        }
        "high_intensity_interval_training" => Some(WorkoutType::Hiit),
        "yoga" => Some(WorkoutType::Yoga),
        "pilates" => Some(WorkoutType::Pilates),
        "soccer" | "basketball" | "tennis" | "volleyball" | "pickleball" => {
            Some(WorkoutType::Sports)
        }
        _ => None,
    }
}

/// Convert a raw source workout into a review item.
///
/// Returns `None` for unsupported activity types; this is a filter, not
/// a failure. Heart rate, pace, elevation, and route are left empty —
/// filling them would take a secondary per-workout query.
fn convert_to_review_item(
    raw: &ExternalWorkout,
    detected_at: DateTime<Utc>,
) -> Option<WorkoutReviewItem> {
    let workout_type = map_activity_type(&raw.activity_type)?;

    Some(WorkoutReviewItem {
        id: Uuid::new_v4(),
        source_workout_id: raw.id,
        date: raw.started_at,
        workout_type,
        duration_secs: raw.duration_secs,
        calories: raw.active_energy_kcal.map(|kcal| kcal as u32),
        distance_miles: raw.distance_meters.map(|m| m / METERS_PER_MILE),
        average_pace: None,
        average_heart_rate: None,
        max_heart_rate: None,
        elevation_gain: None,
        route_data: None,
        detected_at,
    })
}

// SPDX-License-Identifier: MIT

//! Pending review items for workouts detected in the health source.
//!
//! Review items are transient: they live in the in-memory review queue
//! until the user approves (converting them into a persisted `Workout`
//! or `CardioSession`) or ignores them. They are never stored.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::cardio::{CardioSession, CardioType};
use crate::models::workout::{ReviewStatus, Workout, WorkoutSource, WorkoutType};

/// A workout observed in the external source, staged for user review.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutReviewItem {
    pub id: Uuid,
    /// The external source's workout identifier, kept for de-duplication
    /// and audit after approval.
    pub source_workout_id: Uuid,
    pub date: DateTime<Utc>,
    pub workout_type: WorkoutType,
    /// Duration in seconds.
    pub duration_secs: f64,
    pub calories: Option<u32>,
    /// Distance in miles.
    pub distance_miles: Option<f64>,

    // Cardio-specific fields. The base conversion leaves these empty;
    // populating them would require a secondary per-workout query.
    pub average_pace: Option<f64>,
    pub average_heart_rate: Option<u32>,
    pub max_heart_rate: Option<u32>,
    pub elevation_gain: Option<f64>,
    pub route_data: Option<Vec<u8>>,

    /// When the sync engine first saw this workout.
    pub detected_at: DateTime<Utc>,
}

impl WorkoutReviewItem {
    /// Whether the mapped type belongs to the fixed cardio subset.
    pub fn is_cardio(&self) -> bool {
        CardioType::try_from(self.workout_type).is_ok()
    }

    /// Convert into a persisted `Workout`, approved, sourced from the
    /// platform health store.
    pub fn to_workout(&self, now: DateTime<Utc>) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            date: self.date,
            workout_type: self.workout_type,
            duration_secs: self.duration_secs,
            calories: self.calories,
            notes: None,
            exercises: Vec::new(),
            source: WorkoutSource::PlatformHealth,
            source_workout_id: Some(self.source_workout_id),
            review_status: ReviewStatus::Approved,
            created_at: now,
            last_updated: now,
        }
    }

    /// Convert into a persisted `CardioSession`. Returns `None` when the
    /// mapped type is not cardio.
    pub fn to_cardio_session(&self, now: DateTime<Utc>) -> Option<CardioSession> {
        let cardio_type = CardioType::try_from(self.workout_type).ok()?;

        Some(CardioSession {
            id: Uuid::new_v4(),
            date: self.date,
            cardio_type,
            duration_secs: self.duration_secs,
            distance_miles: self.distance_miles,
            calories: self.calories,
            average_pace: self.average_pace,
            average_speed: None,
            average_heart_rate: self.average_heart_rate,
            max_heart_rate: self.max_heart_rate,
            elevation_gain: self.elevation_gain,
            route_data: self.route_data.clone(),
            source: WorkoutSource::PlatformHealth,
            source_workout_id: Some(self.source_workout_id),
            created_at: now,
            last_updated: now,
        })
    }
}

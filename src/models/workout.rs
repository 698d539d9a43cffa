// SPDX-License-Identifier: MIT

//! Workout domain model and its supporting enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted workout session (strength or general training).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub workout_type: WorkoutType,
    /// Duration in seconds.
    pub duration_secs: f64,
    pub calories: Option<u32>,
    pub notes: Option<String>,

    /// Ordered exercises, for strength workouts entered manually.
    pub exercises: Vec<Exercise>,

    // Source tracking
    pub source: WorkoutSource,
    /// External-source workout id, kept for audit when the record came
    /// in through the review flow.
    pub source_workout_id: Option<Uuid>,

    pub review_status: ReviewStatus,

    // Metadata
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// One exercise within a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub sets: Vec<ExerciseSet>,
    pub notes: Option<String>,
}

/// One set within an exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub id: Uuid,
    pub reps: u32,
    /// Weight in pounds or kilograms, per the user's unit preference.
    pub weight: Option<f64>,
    /// Duration in seconds, for timed exercises.
    pub duration_secs: Option<f64>,
    pub completed: bool,
}

/// The closed domain workout taxonomy. External activity types that do
/// not map onto one of these variants are dropped at conversion time.
///
/// Unknown strings fail deserialization loudly rather than falling back
/// to a default variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Strength,
    Hiit,
    Yoga,
    Pilates,
    Sports,
    Running,
    Walking,
    Cycling,
    Swimming,
    Hiking,
    StairClimbing,
    Rowing,
    Elliptical,
}

/// Where a workout record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutSource {
    Manual,
    PlatformHealth,
    Wearable,
}

/// Review state for workouts that arrived via the health source.
/// Manually entered workouts are created already approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Ignored,
}

impl Workout {
    pub fn is_on(&self, day: chrono::NaiveDate) -> bool {
        self.date.date_naive() == day
    }
}

// SPDX-License-Identifier: MIT

//! Cardio session domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::workout::{WorkoutSource, WorkoutType};

/// A persisted distance/pace-based session (running, cycling, etc.).
/// Structurally parallel to `Workout` but with performance fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardioSession {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub cardio_type: CardioType,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Distance in miles.
    pub distance_miles: Option<f64>,
    pub calories: Option<u32>,

    // Performance metrics
    /// Minutes per mile.
    pub average_pace: Option<f64>,
    /// Miles per hour.
    pub average_speed: Option<f64>,
    pub average_heart_rate: Option<u32>,
    pub max_heart_rate: Option<u32>,
    /// Elevation gain in feet.
    pub elevation_gain: Option<f64>,

    /// Encoded route coordinates, when the source supplied them.
    pub route_data: Option<Vec<u8>>,

    // Source tracking
    pub source: WorkoutSource,
    pub source_workout_id: Option<Uuid>,

    // Metadata
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// The fixed cardio subset of the workout taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardioType {
    Running,
    Walking,
    Cycling,
    Swimming,
    Hiking,
    StairClimbing,
    Rowing,
    Elliptical,
}

impl TryFrom<WorkoutType> for CardioType {
    type Error = WorkoutType;

    /// Returns the rejected workout type for non-cardio variants.
    fn try_from(value: WorkoutType) -> std::result::Result<Self, WorkoutType> {
        match value {
            WorkoutType::Running => Ok(CardioType::Running),
            WorkoutType::Walking => Ok(CardioType::Walking),
            WorkoutType::Cycling => Ok(CardioType::Cycling),
            WorkoutType::Swimming => Ok(CardioType::Swimming),
            WorkoutType::Hiking => Ok(CardioType::Hiking),
            WorkoutType::StairClimbing => Ok(CardioType::StairClimbing),
            WorkoutType::Rowing => Ok(CardioType::Rowing),
            WorkoutType::Elliptical => Ok(CardioType::Elliptical),
            other => Err(other),
        }
    }
}

impl CardioSession {
    pub fn is_on(&self, day: chrono::NaiveDate) -> bool {
        self.date.date_naive() == day
    }
}

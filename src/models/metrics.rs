// SPDX-License-Identifier: MIT

//! Daily health metrics pulled from the platform health source.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Meters per statute mile, for converting source distances to display units.
pub const METERS_PER_MILE: f64 = 1609.34;

/// One day's activity metrics. At most one record exists per calendar day
/// in the local store; syncs overwrite it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub id: Uuid,
    pub date: DateTime<Utc>,

    // Activity
    pub steps: u32,
    /// Distance in miles (converted from the source's meters).
    pub distance_miles: f64,
    pub active_calories: u32,
    /// Active + basal energy; equals `active_calories` when basal is unavailable.
    pub total_calories: u32,
    pub active_minutes: u32,

    // Heart rate (absent when the source can't provide it)
    pub average_heart_rate: Option<u32>,
    pub resting_heart_rate: Option<u32>,
    pub max_heart_rate: Option<u32>,

    pub flights_climbed: Option<u32>,

    // Metadata
    pub last_synced: DateTime<Utc>,
    pub source: MetricSource,
}

/// Where a metrics record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricSource {
    PlatformHealth,
    Manual,
    Wearable,
}

impl HealthMetrics {
    /// The calendar day this record is keyed by.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub fn is_today(&self) -> bool {
        self.day() == Utc::now().date_naive()
    }
}

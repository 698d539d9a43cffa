// SPDX-License-Identifier: MIT

//! Daily task / habit domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A simple daily task. Completed tasks are one of the three activity
/// signals the streak engine looks at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTask {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: TaskCategory,
    pub is_completed: bool,
    pub date: DateTime<Utc>,

    // Optional scheduling
    pub scheduled_time: Option<DateTime<Utc>>,
    pub reminder_enabled: bool,

    // Metadata
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Fitness,
    Nutrition,
    Wellness,
    Hydration,
    Sleep,
    Mindfulness,
}

impl DailyTask {
    /// Create a new, uncompleted task dated now.
    pub fn new(title: impl Into<String>, category: TaskCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            category,
            is_completed: false,
            date: now,
            scheduled_time: None,
            reminder_enabled: false,
            created_at: now,
            completed_at: None,
        }
    }

    /// Flip completion, stamping or clearing the completion time.
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.is_completed = !self.is_completed;
        self.completed_at = self.is_completed.then_some(now);
    }

    pub fn is_on(&self, day: chrono::NaiveDate) -> bool {
        self.date.date_naive() == day
    }
}

// SPDX-License-Identifier: MIT

//! Day-activity streak aggregate.
//!
//! The streak is a singleton per user, persisted as one serialized blob
//! under a fixed key. All mutation goes through the streak engine's
//! single transition function; the methods here are the pure pieces of
//! that state machine, parameterized on the evaluation time so tests can
//! pin the clock.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time_utils::days_between;

/// Weekly milestone cadence: one milestone every seven consecutive days.
const MILESTONE_INTERVAL_DAYS: u32 = 7;

/// Consecutive-day activity streak with milestone history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Streak {
    /// Consecutive active days, ending at `last_active_date`.
    #[serde(default)]
    pub current_streak: u32,
    /// Longest run ever achieved; always >= `current_streak`.
    #[serde(default)]
    pub longest_streak: u32,
    /// The most recent day that counted as active.
    #[serde(default)]
    pub last_active_date: Option<DateTime<Utc>>,
    /// When the current run began; cleared on reset.
    #[serde(default)]
    pub streak_start_date: Option<DateTime<Utc>>,
    /// Milestones achieved, in the order they were reached.
    #[serde(default)]
    pub milestones: Vec<StreakMilestone>,
}

/// A recorded streak achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakMilestone {
    pub id: Uuid,
    /// Streak length when the milestone was reached.
    pub days: u32,
    pub achieved_date: DateTime<Utc>,
    pub kind: MilestoneType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneType {
    Current,
    Longest,
    Special,
}

impl Streak {
    /// Whether today's activity has already been counted.
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.last_active_date
            .is_some_and(|last| last.date_naive() == today)
    }

    /// Whether the last active day was exactly yesterday, i.e. activity
    /// today extends the run.
    pub fn needs_activity_on(&self, today: NaiveDate) -> bool {
        self.last_active_date
            .is_some_and(|last| days_between(last.date_naive(), today) == 1)
    }

    /// Whether more than one day has passed since the last active day.
    /// A streak with no prior activity is not considered broken.
    pub fn is_broken_at(&self, today: NaiveDate) -> bool {
        self.last_active_date
            .is_some_and(|last| days_between(last.date_naive(), today) > 1)
    }

    /// Count today as active: extend the run, update the longest-run
    /// high-water mark, and record a milestone every seventh day.
    pub fn increment_at(&mut self, now: DateTime<Utc>) {
        self.current_streak += 1;
        self.last_active_date = Some(now);

        if self.streak_start_date.is_none() {
            self.streak_start_date = Some(now);
        }

        if self.current_streak > self.longest_streak {
            self.longest_streak = self.current_streak;
        }

        if self.current_streak % MILESTONE_INTERVAL_DAYS == 0 {
            self.milestones.push(StreakMilestone {
                id: Uuid::new_v4(),
                days: self.current_streak,
                achieved_date: now,
                kind: MilestoneType::Current,
            });
        }
    }

    /// Break the run. `last_active_date` is left untouched so the break
    /// remains datable; `longest_streak` and milestones survive.
    pub fn reset(&mut self) {
        self.current_streak = 0;
        self.streak_start_date = None;
    }
}

// SPDX-License-Identifier: MIT

//! Services module - the sync engines and their coordinator.

pub mod coordinator;
pub mod metric_sync;
pub mod review;
pub mod streak;
pub mod workout_sync;

pub use coordinator::{spawn_observer_pump, SyncCoordinator, SyncStatus};
pub use metric_sync::MetricSyncEngine;
pub use review::{BatchFailure, BatchOutcome, ReviewQueue};
pub use streak::StreakEngine;
pub use workout_sync::WorkoutSyncEngine;

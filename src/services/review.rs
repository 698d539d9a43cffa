// SPDX-License-Identifier: MIT

//! In-memory review queue for pending workout items.
//!
//! The queue lives for the process lifetime and is never persisted. All
//! mutation is serialized through one mutex-owned `Vec`; sync appends,
//! approve/ignore remove.

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::WorkoutReviewItem;

/// Pending workouts awaiting user review.
#[derive(Default)]
pub struct ReviewQueue {
    items: Mutex<Vec<WorkoutReviewItem>>,
}

impl ReviewQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append newly detected items.
    pub async fn append(&self, new_items: Vec<WorkoutReviewItem>) {
        self.items.lock().await.extend(new_items);
    }

    /// Replace the whole queue (used by full re-fetches).
    pub async fn replace(&self, new_items: Vec<WorkoutReviewItem>) {
        *self.items.lock().await = new_items;
    }

    /// Look up an item by id without removing it.
    pub async fn get(&self, id: &Uuid) -> Option<WorkoutReviewItem> {
        self.items
            .lock()
            .await
            .iter()
            .find(|item| item.id == *id)
            .cloned()
    }

    /// Remove an item by id, returning it if present.
    pub async fn remove(&self, id: &Uuid) -> Option<WorkoutReviewItem> {
        let mut items = self.items.lock().await;
        let index = items.iter().position(|item| item.id == *id)?;
        Some(items.remove(index))
    }

    /// Snapshot of the queue for display, newest first.
    pub async fn snapshot(&self) -> Vec<WorkoutReviewItem> {
        let mut items = self.items.lock().await.clone();
        items.sort_by(|a, b| b.date.cmp(&a.date));
        items
    }

    /// Drop everything, returning how many items were discarded.
    pub async fn clear(&self) -> usize {
        let mut items = self.items.lock().await;
        let count = items.len();
        items.clear();
        count
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }
}

/// Aggregate result of a bulk approve. Per-item failures are collected
/// here instead of aborting the batch or being silently dropped.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Items committed to the store.
    pub succeeded: usize,
    /// Items that failed; they remain in the queue.
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One failed item within a bulk operation.
#[derive(Debug)]
pub struct BatchFailure {
    pub item_id: Uuid,
    pub error: String,
}

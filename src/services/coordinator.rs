// SPDX-License-Identifier: MIT

//! Sync coordinator.
//!
//! The single owner of the sync pipeline: it drives authorization,
//! background-delivery enablement, initial and manual syncs, and the
//! review queue, and exposes the unified state the presentation layer
//! reads. At most one sync operation runs at a time; overlapping calls
//! queue on an internal guard so the change anchor can never be
//! double-advanced and the per-day metrics upsert can never race.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, Mutex, RwLock};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::SyncSettings;
use crate::error::{HealthSyncError, Result};
use crate::health::{
    AuthorizationStatus, DeliveryFrequency, HealthSource, ObserverEvent, SampleType, READ_TYPES,
    WRITE_TYPES,
};
use crate::models::{HealthMetrics, Streak, WorkoutReviewItem};
use crate::services::metric_sync::MetricSyncEngine;
use crate::services::review::{BatchFailure, BatchOutcome, ReviewQueue};
use crate::services::streak::StreakEngine;
use crate::services::workout_sync::WorkoutSyncEngine;
use crate::store::LocalStore;

/// Capacity of the observer channel. Signals carry no data, so a small
/// buffer is enough; a full buffer just coalesces wake-ups.
const OBSERVER_CHANNEL_CAPACITY: usize = 8;

/// Snapshot of coordinator state for presentation-layer consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncStatus {
    pub authorization: AuthorizationStatus,
    pub last_synced: Option<DateTime<Utc>>,
    pub pending_reviews: usize,
}

/// Orchestrates the sync engines over one source and one store.
pub struct SyncCoordinator {
    source: Arc<dyn HealthSource>,
    metric_sync: MetricSyncEngine,
    workout_sync: WorkoutSyncEngine,
    streak: StreakEngine,
    review_queue: ReviewQueue,

    authorization: RwLock<AuthorizationStatus>,
    last_synced: RwLock<Option<DateTime<Utc>>>,
    /// Serializes sync operations against each other.
    sync_guard: Mutex<()>,

    settings: SyncSettings,
}

impl SyncCoordinator {
    /// Wire the pipeline onto a source and store. Nothing is fetched
    /// until authorization or a sync call.
    pub fn new(
        source: Arc<dyn HealthSource>,
        store: Arc<dyn LocalStore>,
        settings: SyncSettings,
    ) -> Self {
        let initial_status = if source.is_available() {
            source.authorization_status(SampleType::Workouts)
        } else {
            AuthorizationStatus::NotDetermined
        };

        Self {
            metric_sync: MetricSyncEngine::new(Arc::clone(&source), Arc::clone(&store)),
            workout_sync: WorkoutSyncEngine::new(Arc::clone(&source), Arc::clone(&store)),
            streak: StreakEngine::new(Arc::clone(&store), settings.clone()),
            review_queue: ReviewQueue::new(),
            source,
            authorization: RwLock::new(initial_status),
            last_synced: RwLock::new(None),
            sync_guard: Mutex::new(()),
            settings,
        }
    }

    // ─── Authorization ───────────────────────────────────────────────

    /// Request read/write access to the health source. On success,
    /// enables background delivery and runs the initial sync; failures
    /// in either follow-up are logged but do not fail the authorization
    /// itself.
    pub async fn request_authorization(&self) -> Result<bool> {
        if !self.source.is_available() {
            return Err(HealthSyncError::SourceUnavailable);
        }

        let granted = self
            .source
            .request_authorization(READ_TYPES, WRITE_TYPES)
            .await?;

        *self.authorization.write().await = if granted {
            AuthorizationStatus::Authorized
        } else {
            AuthorizationStatus::Denied
        };

        if granted {
            match self
                .source
                .enable_background_delivery(DeliveryFrequency::Immediate)
                .await
            {
                Ok(true) => tracing::info!("Background delivery enabled for workouts"),
                Ok(false) => tracing::warn!("Background delivery request was refused"),
                Err(e) => tracing::warn!(error = %e, "Failed to enable background delivery"),
            }

            if let Err(e) = self.perform_initial_sync().await {
                tracing::warn!(error = %e, "Initial sync failed");
            }
        }

        Ok(granted)
    }

    // ─── Sync Operations ─────────────────────────────────────────────

    /// Full first sync: today's metrics plus any new workouts, which
    /// replace the pending queue.
    pub async fn perform_initial_sync(&self) -> Result<()> {
        let _guard = self.sync_guard.lock().await;

        tracing::info!("Performing initial health sync");

        self.metric_sync.sync_today_metrics().await?;

        let items = self.workout_sync.fetch_new_workouts().await?;
        let staged = items.len();
        self.review_queue.replace(items).await;

        *self.last_synced.write().await = Some(Utc::now());

        tracing::info!(pending = staged, "Initial sync complete");
        Ok(())
    }

    /// Pull today's metrics and upsert the per-day record.
    pub async fn sync_today_metrics(&self) -> Result<HealthMetrics> {
        let _guard = self.sync_guard.lock().await;

        let metrics = self.metric_sync.sync_today_metrics().await?;
        *self.last_synced.write().await = Some(Utc::now());

        Ok(metrics)
    }

    /// Incrementally fetch new workouts and append them to the pending
    /// queue. Returns how many items were staged.
    pub async fn sync_workouts(&self) -> Result<usize> {
        let _guard = self.sync_guard.lock().await;

        let items = self.workout_sync.fetch_new_workouts().await?;
        let staged = items.len();
        self.review_queue.append(items).await;

        Ok(staged)
    }

    /// Scan the last `days` days (default from settings) and replace the
    /// pending queue with the result. Returns the new pending count.
    pub async fn fetch_recent_workouts(&self, days: Option<u32>) -> Result<usize> {
        let days = days.unwrap_or(self.settings.recent_workout_window_days);
        let _guard = self.sync_guard.lock().await;

        let items = self.workout_sync.fetch_recent_workouts(days).await?;
        let staged = items.len();
        self.review_queue.replace(items).await;

        Ok(staged)
    }

    // ─── Workout Review ──────────────────────────────────────────────

    /// Approve one pending item: commit it to the store and drop it from
    /// the queue. Returns `false` if the id is not pending (no-op).
    pub async fn approve_workout(&self, id: Uuid) -> Result<bool> {
        let Some(item) = self.review_queue.get(&id).await else {
            tracing::debug!(%id, "Approve requested for unknown review item");
            return Ok(false);
        };

        self.workout_sync.approve(&item).await?;
        self.review_queue.remove(&id).await;

        Ok(true)
    }

    /// Ignore one pending item: drop it from the queue, store untouched.
    /// Returns `false` if the id is not pending.
    pub async fn ignore_workout(&self, id: Uuid) -> bool {
        match self.review_queue.remove(&id).await {
            Some(item) => {
                self.workout_sync.ignore(&item);
                true
            }
            None => false,
        }
    }

    /// Approve every pending item. Per-item failures do not stop the
    /// batch; failed items stay queued and are reported in the outcome.
    pub async fn approve_all(&self) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for item in self.review_queue.snapshot().await {
            match self.workout_sync.approve(&item).await {
                Ok(()) => {
                    self.review_queue.remove(&item.id).await;
                    outcome.succeeded += 1;
                }
                Err(e) => {
                    tracing::warn!(item_id = %item.id, error = %e, "Bulk approve item failed");
                    outcome.failures.push(BatchFailure {
                        item_id: item.id,
                        error: e.to_string(),
                    });
                }
            }
        }

        outcome
    }

    /// Ignore every pending item. Returns how many were discarded.
    pub async fn ignore_all(&self) -> usize {
        for item in self.review_queue.snapshot().await {
            self.workout_sync.ignore(&item);
        }
        self.review_queue.clear().await
    }

    /// Pending items for display, newest first.
    pub async fn pending_workouts(&self) -> Vec<WorkoutReviewItem> {
        self.review_queue.snapshot().await
    }

    pub async fn has_pending_workouts(&self) -> bool {
        !self.review_queue.is_empty().await
    }

    /// Drop all pending items without touching the store.
    pub async fn clear_pending(&self) -> usize {
        self.review_queue.clear().await
    }

    // ─── Streak ──────────────────────────────────────────────────────

    /// Re-evaluate and persist the activity streak.
    pub async fn update_streak(&self) -> Result<Streak> {
        self.streak.update_streak().await
    }

    /// The persisted streak without re-evaluating it.
    pub async fn current_streak(&self) -> Result<Streak> {
        self.streak.current_streak().await
    }

    // ─── State ───────────────────────────────────────────────────────

    /// Unified state snapshot for the presentation layer.
    pub async fn state(&self) -> SyncStatus {
        SyncStatus {
            authorization: *self.authorization.read().await,
            last_synced: *self.last_synced.read().await,
            pending_reviews: self.review_queue.len().await,
        }
    }

    // ─── Background Delivery ─────────────────────────────────────────

    /// Subscribe to the source's observer signals and spawn the pump
    /// task that services them. Returns the pump's join handle; the pump
    /// exits when the source drops its sender.
    pub fn start_background_sync(self: &Arc<Self>) -> JoinHandle<()> {
        let (tx, rx) = mpsc::channel(OBSERVER_CHANNEL_CAPACITY);
        self.source.subscribe(tx);

        tracing::info!("Workout observer registered");

        spawn_observer_pump(Arc::clone(self), rx)
    }
}

/// Drain observer events, running an incremental workout sync for each.
///
/// Enqueueing an event is cheap and bounded, which is what keeps the
/// platform's delivery-acknowledgment deadline away from the slower
/// fetch-and-convert work here. Each event's completion signal fires
/// after its sync attempt finishes, success or failure.
pub fn spawn_observer_pump(
    coordinator: Arc<SyncCoordinator>,
    mut events: mpsc::Receiver<ObserverEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match coordinator.sync_workouts().await {
                Ok(staged) if staged > 0 => {
                    tracing::info!(staged, "Background delivery staged new workouts");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Background workout sync failed");
                }
            }

            if let Some(done) = event.completed {
                let _ = done.send(());
            }
        }

        tracing::debug!("Observer pump stopped (source closed the channel)");
    })
}

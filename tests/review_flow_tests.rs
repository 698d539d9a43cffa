// SPDX-License-Identifier: MIT

//! Review flow tests: approve/ignore semantics, cardio vs workout
//! classification, and partial failure in bulk operations.

mod common;

use std::sync::Arc;

use common::{external_workout, external_workout_with, FlakyStore, MockHealthSource};
use momentum_core::config::SyncSettings;
use momentum_core::models::{ReviewStatus, WorkoutSource, WorkoutType};
use momentum_core::services::SyncCoordinator;
use momentum_core::store::{LocalStore, MemoryStore};
use uuid::Uuid;

fn coordinator_with_store(
    source: &Arc<MockHealthSource>,
    store: Arc<dyn LocalStore>,
) -> Arc<SyncCoordinator> {
    Arc::new(SyncCoordinator::new(
        Arc::clone(source) as Arc<dyn momentum_core::health::HealthSource>,
        store,
        SyncSettings::default(),
    ))
}

#[tokio::test]
async fn test_approving_cardio_item_commits_cardio_session() {
    let source = Arc::new(MockHealthSource::new());
    let store = Arc::new(MemoryStore::new());
    let coordinator = coordinator_with_store(&source, Arc::clone(&store) as Arc<dyn LocalStore>);

    let raw = external_workout_with("running", 2, 280.0, 8046.7);
    source.push_workout(raw.clone());
    coordinator.sync_workouts().await.unwrap();

    let pending = coordinator.pending_workouts().await;
    assert_eq!(pending.len(), 1);

    let approved = coordinator.approve_workout(pending[0].id).await.unwrap();
    assert!(approved);

    // Exactly one new cardio session, no plain workout.
    assert_eq!(store.cardio_session_count(), 1);
    assert_eq!(store.workout_count(), 0);
    assert!(coordinator.pending_workouts().await.is_empty());

    let sessions = store
        .cardio_sessions_for_day(pending[0].date.date_naive())
        .await
        .unwrap();
    let session = &sessions[0];
    assert!((session.distance_miles.unwrap() - 5.0).abs() < 0.01);
    assert_eq!(session.duration_secs, 1800.0);
    assert_eq!(session.calories, Some(280));
    assert_eq!(session.source, WorkoutSource::PlatformHealth);
    assert_eq!(session.source_workout_id, Some(raw.id));
}

#[tokio::test]
async fn test_approving_non_cardio_item_commits_workout() {
    let source = Arc::new(MockHealthSource::new());
    let store = Arc::new(MemoryStore::new());
    let coordinator = coordinator_with_store(&source, Arc::clone(&store) as Arc<dyn LocalStore>);

    let raw = external_workout("traditional_strength_training", 3);
    source.push_workout(raw.clone());
    coordinator.sync_workouts().await.unwrap();

    let pending = coordinator.pending_workouts().await;
    assert!(coordinator.approve_workout(pending[0].id).await.unwrap());

    assert_eq!(store.workout_count(), 1);
    assert_eq!(store.cardio_session_count(), 0);

    let workouts = store
        .workouts_for_day(pending[0].date.date_naive())
        .await
        .unwrap();
    let workout = &workouts[0];
    assert_eq!(workout.workout_type, WorkoutType::Strength);
    assert_eq!(workout.review_status, ReviewStatus::Approved);
    assert_eq!(workout.source, WorkoutSource::PlatformHealth);
    assert_eq!(workout.source_workout_id, Some(raw.id));
}

#[tokio::test]
async fn test_cardio_without_distance_commits_as_workout() {
    let source = Arc::new(MockHealthSource::new());
    let store = Arc::new(MemoryStore::new());
    let coordinator = coordinator_with_store(&source, Arc::clone(&store) as Arc<dyn LocalStore>);

    // A run the source reported with no distance total.
    source.push_workout(external_workout("running", 1));
    coordinator.sync_workouts().await.unwrap();

    let pending = coordinator.pending_workouts().await;
    assert!(coordinator.approve_workout(pending[0].id).await.unwrap());

    assert_eq!(store.workout_count(), 1);
    assert_eq!(store.cardio_session_count(), 0);
}

#[tokio::test]
async fn test_approve_unknown_id_is_a_noop() {
    let source = Arc::new(MockHealthSource::new());
    let store = Arc::new(MemoryStore::new());
    let coordinator = coordinator_with_store(&source, Arc::clone(&store) as Arc<dyn LocalStore>);

    let approved = coordinator.approve_workout(Uuid::new_v4()).await.unwrap();

    assert!(!approved);
    assert_eq!(store.workout_count(), 0);
}

#[tokio::test]
async fn test_ignore_discards_without_store_mutation() {
    let source = Arc::new(MockHealthSource::new());
    let store = Arc::new(MemoryStore::new());
    let coordinator = coordinator_with_store(&source, Arc::clone(&store) as Arc<dyn LocalStore>);

    source.push_workout(external_workout("swimming", 2));
    coordinator.sync_workouts().await.unwrap();

    let pending = coordinator.pending_workouts().await;
    assert!(coordinator.ignore_workout(pending[0].id).await);

    assert!(coordinator.pending_workouts().await.is_empty());
    assert_eq!(store.workout_count(), 0);
    assert_eq!(store.cardio_session_count(), 0);

    assert!(!coordinator.ignore_workout(pending[0].id).await);
}

#[tokio::test]
async fn test_bulk_approve_reports_per_item_failures() {
    let source = Arc::new(MockHealthSource::new());
    let store = Arc::new(FlakyStore::new());
    let coordinator = coordinator_with_store(
        &source,
        Arc::clone(&store) as Arc<dyn LocalStore>,
    );

    // One cardio item (cardio-session path) and one strength item
    // (workout path, which we break).
    source.push_workout(external_workout_with("cycling", 4, 300.0, 16093.4));
    source.push_workout(external_workout("functional_strength_training", 2));
    coordinator.sync_workouts().await.unwrap();

    store.fail_workout_inserts();

    let outcome = coordinator.approve_all().await;

    assert_eq!(outcome.succeeded, 1);
    assert_eq!(outcome.failures.len(), 1);
    assert!(!outcome.is_clean());

    // The failed item stays queued for retry; the committed one is gone.
    let remaining = coordinator.pending_workouts().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, outcome.failures[0].item_id);
    assert_eq!(store.inner().cardio_session_count(), 1);
    assert_eq!(store.inner().workout_count(), 0);
}

#[tokio::test]
async fn test_bulk_ignore_clears_queue_only() {
    let source = Arc::new(MockHealthSource::new());
    let store = Arc::new(MemoryStore::new());
    let coordinator = coordinator_with_store(&source, Arc::clone(&store) as Arc<dyn LocalStore>);

    source.push_workout(external_workout("running", 5));
    source.push_workout(external_workout("yoga", 3));
    coordinator.sync_workouts().await.unwrap();

    let discarded = coordinator.ignore_all().await;

    assert_eq!(discarded, 2);
    assert!(!coordinator.has_pending_workouts().await);
    assert_eq!(store.workout_count(), 0);
    assert_eq!(store.cardio_session_count(), 0);
}

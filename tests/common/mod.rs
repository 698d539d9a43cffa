// SPDX-License-Identifier: MIT

//! Shared test fixtures: a scriptable health source and a store wrapper
//! that can be made to fail on demand.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use dashmap::DashMap;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use momentum_core::error::{HealthSyncError, Result};
use momentum_core::health::{
    AnchorToken, AuthorizationStatus, DeliveryFrequency, ExternalWorkout, HealthSource,
    MetricKind, ObserverEvent, Sample, SampleType,
};
use momentum_core::models::{CardioSession, DailyTask, HealthMetrics, TaskCategory, Workout};
use momentum_core::store::{LocalStore, MemoryStore};

/// Scriptable in-memory health source.
///
/// Workouts form an append-only change log; the incremental anchor is
/// the index of the next unseen entry, encoded as a decimal string.
#[allow(dead_code)]
pub struct MockHealthSource {
    available: AtomicBool,
    grant_authorization: AtomicBool,
    background_enabled: AtomicBool,
    metrics: DashMap<MetricKind, f64>,
    failing: DashMap<MetricKind, ()>,
    no_data: DashMap<MetricKind, ()>,
    samples: DashMap<MetricKind, Vec<Sample>>,
    workouts: StdMutex<Vec<ExternalWorkout>>,
    subscribers: StdMutex<Vec<mpsc::Sender<ObserverEvent>>>,
}

#[allow(dead_code)]
impl MockHealthSource {
    pub fn new() -> Self {
        Self {
            available: AtomicBool::new(true),
            grant_authorization: AtomicBool::new(true),
            background_enabled: AtomicBool::new(false),
            metrics: DashMap::new(),
            failing: DashMap::new(),
            no_data: DashMap::new(),
            samples: DashMap::new(),
            workouts: StdMutex::new(Vec::new()),
            subscribers: StdMutex::new(Vec::new()),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn deny_authorization(&self) {
        self.grant_authorization.store(false, Ordering::SeqCst);
    }

    pub fn background_delivery_enabled(&self) -> bool {
        self.background_enabled.load(Ordering::SeqCst)
    }

    pub fn set_metric(&self, kind: MetricKind, value: f64) {
        self.metrics.insert(kind, value);
    }

    /// Make every query for this metric fail with `QueryFailed`.
    pub fn fail_metric(&self, kind: MetricKind) {
        self.failing.insert(kind, ());
    }

    /// Make every query for this metric fail with `NoData`.
    pub fn no_data_for(&self, kind: MetricKind) {
        self.no_data.insert(kind, ());
    }

    /// Provide raw samples for a metric, newest first.
    pub fn set_samples(&self, kind: MetricKind, samples: Vec<Sample>) {
        self.samples.insert(kind, samples);
    }

    /// Append a workout to the change log.
    pub fn push_workout(&self, workout: ExternalWorkout) {
        self.workouts.lock().unwrap().push(workout);
    }

    /// Fire an observer signal and return a receiver that resolves once
    /// the consumption loop has finished processing it.
    pub async fn notify(&self) -> oneshot::Receiver<()> {
        let sender = self
            .subscribers
            .lock()
            .unwrap()
            .first()
            .cloned()
            .expect("no observer subscribed");

        let (event, rx) = ObserverEvent::with_completion();
        sender.send(event).await.expect("observer channel closed");
        rx
    }

    fn check_failures(&self, metric: MetricKind) -> Result<()> {
        if self.failing.contains_key(&metric) {
            return Err(HealthSyncError::QueryFailed(format!(
                "scripted failure for {:?}",
                metric
            )));
        }
        if self.no_data.contains_key(&metric) {
            return Err(HealthSyncError::NoData);
        }
        Ok(())
    }
}

#[async_trait]
impl HealthSource for MockHealthSource {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn request_authorization(
        &self,
        _read_types: &[SampleType],
        _write_types: &[SampleType],
    ) -> Result<bool> {
        Ok(self.grant_authorization.load(Ordering::SeqCst))
    }

    fn authorization_status(&self, _sample_type: SampleType) -> AuthorizationStatus {
        if self.grant_authorization.load(Ordering::SeqCst) {
            AuthorizationStatus::Authorized
        } else {
            AuthorizationStatus::Denied
        }
    }

    async fn cumulative_sum(
        &self,
        metric: MetricKind,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<f64> {
        self.check_failures(metric)?;
        Ok(self.metrics.get(&metric).map(|v| *v).unwrap_or(0.0))
    }

    async fn samples(
        &self,
        metric: MetricKind,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<Sample>> {
        self.check_failures(metric)?;
        Ok(self
            .samples
            .get(&metric)
            .map(|s| s.value().clone())
            .unwrap_or_default())
    }

    async fn incremental_workouts(
        &self,
        anchor: Option<&AnchorToken>,
    ) -> Result<(Vec<ExternalWorkout>, AnchorToken)> {
        let log = self.workouts.lock().unwrap();

        let start = match anchor {
            Some(token) => token
                .0
                .parse::<usize>()
                .map_err(|e| HealthSyncError::QueryFailed(format!("bad anchor: {}", e)))?,
            None => 0,
        };

        let new_records = log.get(start..).unwrap_or_default().to_vec();
        Ok((new_records, AnchorToken(log.len().to_string())))
    }

    async fn workouts_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ExternalWorkout>> {
        let log = self.workouts.lock().unwrap();
        Ok(log
            .iter()
            .filter(|w| w.started_at >= start && w.started_at < end)
            .cloned()
            .collect())
    }

    async fn enable_background_delivery(&self, _frequency: DeliveryFrequency) -> Result<bool> {
        self.background_enabled.store(true, Ordering::SeqCst);
        Ok(true)
    }

    fn subscribe(&self, events: mpsc::Sender<ObserverEvent>) {
        self.subscribers.lock().unwrap().push(events);
    }
}

/// Store wrapper that can be told to fail workout inserts, for testing
/// partial-failure behavior in bulk operations.
#[derive(Default)]
#[allow(dead_code)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_workout_inserts: AtomicBool,
}

#[allow(dead_code)]
impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_workout_inserts(&self) {
        self.fail_workout_inserts.store(true, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

#[async_trait]
impl LocalStore for FlakyStore {
    async fn upsert_health_metrics(&self, metrics: HealthMetrics) -> Result<()> {
        self.inner.upsert_health_metrics(metrics).await
    }

    async fn health_metrics_for_day(&self, day: NaiveDate) -> Result<Option<HealthMetrics>> {
        self.inner.health_metrics_for_day(day).await
    }

    async fn insert_workout(&self, workout: Workout) -> Result<()> {
        if self.fail_workout_inserts.load(Ordering::SeqCst) {
            return Err(HealthSyncError::Store(
                "scripted workout insert failure".to_string(),
            ));
        }
        self.inner.insert_workout(workout).await
    }

    async fn workouts_for_day(&self, day: NaiveDate) -> Result<Vec<Workout>> {
        self.inner.workouts_for_day(day).await
    }

    async fn insert_cardio_session(&self, session: CardioSession) -> Result<()> {
        self.inner.insert_cardio_session(session).await
    }

    async fn cardio_sessions_for_day(&self, day: NaiveDate) -> Result<Vec<CardioSession>> {
        self.inner.cardio_sessions_for_day(day).await
    }

    async fn upsert_task(&self, task: DailyTask) -> Result<()> {
        self.inner.upsert_task(task).await
    }

    async fn tasks_for_day(&self, day: NaiveDate) -> Result<Vec<DailyTask>> {
        self.inner.tasks_for_day(day).await
    }

    async fn read_blob(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.read_blob(key).await
    }

    async fn write_blob(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.inner.write_blob(key, value).await
    }
}

// ─── Fixture Builders ────────────────────────────────────────────────

/// An external workout started `hours_ago`, with no energy or distance.
#[allow(dead_code)]
pub fn external_workout(activity_type: &str, hours_ago: i64) -> ExternalWorkout {
    ExternalWorkout {
        id: Uuid::new_v4(),
        activity_type: activity_type.to_string(),
        started_at: Utc::now() - Duration::hours(hours_ago),
        duration_secs: 1800.0,
        active_energy_kcal: None,
        distance_meters: None,
    }
}

/// An external workout with energy and distance totals.
#[allow(dead_code)]
pub fn external_workout_with(
    activity_type: &str,
    hours_ago: i64,
    kcal: f64,
    meters: f64,
) -> ExternalWorkout {
    ExternalWorkout {
        active_energy_kcal: Some(kcal),
        distance_meters: Some(meters),
        ..external_workout(activity_type, hours_ago)
    }
}

/// A completed task dated today.
#[allow(dead_code)]
pub fn completed_task_today(title: &str) -> DailyTask {
    let mut task = DailyTask::new(title, TaskCategory::Hydration);
    task.toggle(Utc::now());
    task
}

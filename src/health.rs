// SPDX-License-Identifier: MIT

//! The external health source boundary.
//!
//! The platform health store is opaque to this crate; everything the
//! sync engines need from it is expressed through the [`HealthSource`]
//! trait. A production build backs it with the platform's health API;
//! tests script it with an in-memory mock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use crate::error::Result;

/// Quantity metrics the engines query by cumulative sum or by sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Steps,
    /// Walking/running distance, in meters.
    Distance,
    /// Active energy burned, in kilocalories.
    ActiveEnergy,
    /// Basal (resting) energy burned, in kilocalories.
    BasalEnergy,
    /// Exercise time, in seconds.
    ExerciseTime,
    /// Heart rate samples, in beats per minute.
    HeartRate,
    RestingHeartRate,
    FlightsClimbed,
}

/// Data types named in authorization requests and status queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleType {
    Metric(MetricKind),
    Workouts,
}

/// Authorization state for a sample type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    NotDetermined,
    Denied,
    Authorized,
}

/// One timestamped measurement from a sample query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub taken_at: DateTime<Utc>,
    pub value: f64,
}

/// Opaque cursor into the source's change log, used for incremental
/// "what's new since last check" workout queries. Persisted across
/// launches; its contents are meaningful only to the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorToken(pub String);

/// A raw workout record as the source reports it, before mapping into
/// the domain taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalWorkout {
    /// The source's stable workout identifier.
    pub id: Uuid,
    /// The source's activity-type name (its own taxonomy, not ours).
    pub activity_type: String,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
    /// Total active energy for the workout, when the source exposes it.
    pub active_energy_kcal: Option<f64>,
    /// Total distance in meters, when the source exposes it.
    pub distance_meters: Option<f64>,
}

/// Background delivery cadence for source subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFrequency {
    Immediate,
    Hourly,
    Daily,
}

/// A "new data may exist" signal from the source's observer mechanism.
///
/// The platform adapter enqueues one of these onto the observer channel
/// and may attach a completion sender; the consumption loop fires it
/// once fetch-and-merge work is done (success or failure), which is how
/// the bounded-time acknowledgment the platform demands gets satisfied
/// without coupling it to the slower fetch work.
#[derive(Debug)]
pub struct ObserverEvent {
    pub completed: Option<oneshot::Sender<()>>,
}

impl ObserverEvent {
    pub fn new() -> Self {
        Self { completed: None }
    }

    /// An event paired with a receiver that resolves once the event has
    /// been fully processed.
    pub fn with_completion() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                completed: Some(tx),
            },
            rx,
        )
    }
}

impl Default for ObserverEvent {
    fn default() -> Self {
        Self::new()
    }
}

/// Query contract of the platform health store.
///
/// All methods may suspend; time ranges are half-open `[start, end)`.
#[async_trait]
pub trait HealthSource: Send + Sync {
    /// Whether health data exists on this device at all.
    fn is_available(&self) -> bool;

    /// Prompt for read/write access to the given types. Returns whether
    /// the request completed (the platform does not reveal per-type
    /// grants beyond `authorization_status`).
    async fn request_authorization(
        &self,
        read_types: &[SampleType],
        write_types: &[SampleType],
    ) -> Result<bool>;

    /// Current authorization state for one sample type.
    fn authorization_status(&self, sample_type: SampleType) -> AuthorizationStatus;

    /// Total of a metric over the window, in the metric's native unit.
    async fn cumulative_sum(
        &self,
        metric: MetricKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<f64>;

    /// Raw samples of a metric over the window, newest first.
    async fn samples(
        &self,
        metric: MetricKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Sample>>;

    /// Workouts created or changed since the given anchor, plus the
    /// advanced anchor to persist for the next call. A `None` anchor
    /// means "from the beginning".
    async fn incremental_workouts(
        &self,
        anchor: Option<&AnchorToken>,
    ) -> Result<(Vec<ExternalWorkout>, AnchorToken)>;

    /// Workouts in a bounded time range. Does not touch the anchor.
    async fn workouts_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ExternalWorkout>>;

    /// Ask the platform to wake the app when new workout data arrives.
    async fn enable_background_delivery(&self, frequency: DeliveryFrequency) -> Result<bool>;

    /// Register a channel for "new data may exist" observer signals.
    fn subscribe(&self, events: mpsc::Sender<ObserverEvent>);
}

/// The read set the coordinator requests at authorization time.
pub const READ_TYPES: &[SampleType] = &[
    SampleType::Metric(MetricKind::Steps),
    SampleType::Metric(MetricKind::Distance),
    SampleType::Metric(MetricKind::ActiveEnergy),
    SampleType::Metric(MetricKind::BasalEnergy),
    SampleType::Metric(MetricKind::ExerciseTime),
    SampleType::Metric(MetricKind::HeartRate),
    SampleType::Metric(MetricKind::RestingHeartRate),
    SampleType::Metric(MetricKind::FlightsClimbed),
    SampleType::Workouts,
];

/// The write set: workouts only, so manual entries can flow back later.
pub const WRITE_TYPES: &[SampleType] = &[SampleType::Workouts];

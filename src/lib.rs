// SPDX-License-Identifier: MIT

//! Momentum Core: offline-first fitness tracking engine
//!
//! This crate is the headless core of a personal fitness tracker. It
//! pulls daily activity metrics and workouts from a platform health
//! source, reconciles them against local records, stages detected
//! workouts for user review, and derives a day-activity streak from
//! completed tasks, logged workouts, and step counts.
//!
//! The presentation layer talks to one object, the
//! [`SyncCoordinator`](services::SyncCoordinator); the platform health
//! API and the durable database plug in behind the
//! [`HealthSource`](health::HealthSource) and
//! [`LocalStore`](store::LocalStore) traits.

pub mod config;
pub mod error;
pub mod health;
pub mod models;
pub mod observability;
pub mod services;
pub mod store;
pub mod time_utils;

pub use config::SyncSettings;
pub use error::{HealthSyncError, Result};
pub use services::{SyncCoordinator, SyncStatus};

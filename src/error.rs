// SPDX-License-Identifier: MIT

//! Error types shared across the sync pipeline.

/// Errors raised by the health-data sync pipeline.
#[derive(Debug, thiserror::Error)]
pub enum HealthSyncError {
    #[error("Health data source is not available on this device")]
    SourceUnavailable,

    #[error("Health data access not authorized")]
    NotAuthorized,

    #[error("Health data query failed: {0}")]
    QueryFailed(String),

    #[error("No health data found")]
    NoData,

    #[error("Store error: {0}")]
    Store(String),

    #[error("Persisted state is corrupt: {0}")]
    CorruptState(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for sync operations.
pub type Result<T> = std::result::Result<T, HealthSyncError>;

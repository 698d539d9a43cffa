// SPDX-License-Identifier: MIT

//! Logging setup for embedding applications.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging with an env-filter.
///
/// Honors `RUST_LOG` when set; defaults to debug-level output for this
/// crate and info elsewhere. Safe to call more than once (subsequent
/// calls are no-ops), so test binaries can call it freely.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("momentum_core=debug,info"));

    let format = tracing_subscriber::fmt::layer().with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .try_init();
}

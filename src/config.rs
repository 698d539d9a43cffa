//! Sync settings loaded from environment variables.
//!
//! Everything has a sensible default so an embedding app can run with no
//! environment at all; `.env` files are honored for local development.

use std::env;

/// Tunable settings for the sync pipeline, loaded once at startup.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Step count at or above which a day counts as active for the streak.
    pub step_activity_threshold: u32,
    /// Default window (in days) for the manual recent-workout scan.
    pub recent_workout_window_days: u32,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            step_activity_threshold: 1000,
            recent_workout_window_days: 30,
        }
    }
}

impl SyncSettings {
    /// Load settings from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        Self {
            step_activity_threshold: env::var("STEP_ACTIVITY_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.step_activity_threshold),
            recent_workout_window_days: env::var("RECENT_WORKOUT_WINDOW_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.recent_workout_window_days),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SyncSettings::default();
        assert_eq!(settings.step_activity_threshold, 1000);
        assert_eq!(settings.recent_workout_window_days, 30);
    }

    #[test]
    fn test_from_env_overrides() {
        env::set_var("STEP_ACTIVITY_THRESHOLD", "2500");
        env::set_var("RECENT_WORKOUT_WINDOW_DAYS", "14");

        let settings = SyncSettings::from_env();

        assert_eq!(settings.step_activity_threshold, 2500);
        assert_eq!(settings.recent_workout_window_days, 14);

        env::remove_var("STEP_ACTIVITY_THRESHOLD");
        env::remove_var("RECENT_WORKOUT_WINDOW_DAYS");
    }
}

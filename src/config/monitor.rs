//! Security monitor configuration.

use std::env;

/// Configuration for the in-process security monitor
///
/// The cleanup interval is consumed by the background maintenance task, not
/// by the monitor itself. Together with `anomaly_threshold` it defines the
/// effective per-endpoint rate bar (default: 50 requests per minute).
#[derive(Clone)]
pub struct SecurityMonitorConfig {
    pub max_failed_attempts: usize,
    pub failed_attempt_window_seconds: u64,
    pub anomaly_threshold: u64,
    pub cleanup_interval_seconds: u64,
}

impl Default for SecurityMonitorConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            failed_attempt_window_seconds: 300, // 5 minutes
            anomaly_threshold: 50,
            cleanup_interval_seconds: 60,
        }
    }
}

impl SecurityMonitorConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let max_failed_attempts = env::var("MONITOR_MAX_FAILED_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let failed_attempt_window_seconds = env::var("MONITOR_FAILED_ATTEMPT_WINDOW")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300);

        let anomaly_threshold = env::var("MONITOR_ANOMALY_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(50);

        let cleanup_interval_seconds = env::var("MONITOR_CLEANUP_INTERVAL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        Self {
            max_failed_attempts,
            failed_attempt_window_seconds,
            anomaly_threshold,
            cleanup_interval_seconds,
        }
    }
}

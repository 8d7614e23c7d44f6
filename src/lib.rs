//! Packwatch - in-process security monitoring for a trip-packing web API
//!
//! This crate implements the API's abuse-detection subsystem:
//! - Sliding-window brute-force detection for failed logins, per client IP
//! - Tumbling-window anomaly detection for per-endpoint request rates
//! - A threat-check middleware that rejects flagged traffic with `429`
//! - Structured security audit events and Prometheus metrics
//! - A cancellable background task for periodic state cleanup
//!
//! ## Architecture
//!
//! The codebase is organized into focused modules:
//! - `models/` - Data structures and request/response models
//! - `handlers/` - HTTP request handlers for each endpoint
//! - `middleware/` - Custom middleware for cross-cutting concerns
//! - `services/` - The security monitor and its supporting services
//! - `utils/` - Utility functions and helpers
//! - `config/` - Configuration structures and environment loading
//!
//! ## Quick Start
//!
//! ```no_run
//! use packwatch::{
//!     CleanupTask, SecurityMetrics, SecurityMonitor, SecurityMonitorConfig, create_base_app,
//! };
//! use std::time::Duration;
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = SecurityMonitorConfig::from_env();
//!     let monitor = SecurityMonitor::new(config.clone());
//!     let metrics = SecurityMetrics::new().expect("Failed to create security metrics");
//!     let _cleanup = CleanupTask::spawn(
//!         monitor.clone(),
//!         Duration::from_secs(config.cleanup_interval_seconds),
//!     );
//!     let _app = create_base_app(monitor, metrics);
//!     // Configure and run the server, then shut the cleanup task down.
//!     Ok(())
//! }
//! ```

// Core modules
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types and functions for convenience
pub use config::SecurityMonitorConfig;
pub use handlers::{create_base_app, create_openapi_spec, login, security_metrics, security_stats};
pub use middleware::ThreatCheck;
pub use models::{
    LoginRequest, LoginResponse, SecurityAuditEvent, SecurityEventType, SecuritySeverity,
    SecurityStatsResponse,
};
pub use services::{CleanupTask, MetricsError, MonitorStats, SecurityMetrics, SecurityMonitor};
pub use utils::{extract_client_ip, extract_endpoint, extract_user_agent};

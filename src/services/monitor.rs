//! In-process security monitoring service.

use crate::{
    config::SecurityMonitorConfig,
    models::audit::{SecurityAuditEvent, SecurityEventType, SecuritySeverity},
};
use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use tracing::warn;

/// Diagnostic snapshot of the monitor's bookkeeping state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorStats {
    pub suspicious_ip_count: usize,
    pub monitored_ip_count: usize,
    pub total_pattern_entries: usize,
}

/// All tracked state, guarded as one unit.
///
/// The cleanup pass touches every table in a single critical section, so the
/// tables share one lock rather than being locked independently.
#[derive(Default)]
struct MonitorState {
    /// IP -> time-ordered failed login attempts within the window
    failed_attempts: HashMap<String, VecDeque<Instant>>,
    /// IPs flagged for brute-force behavior
    suspicious_ips: HashSet<String>,
    /// IP -> endpoint -> request count in the current anomaly window
    request_patterns: HashMap<String, HashMap<String, u64>>,
}

/// Tracks brute-force and endpoint-hammering behavior by IP address
///
/// This service monitors failed authentication attempts over a sliding window
/// and per-endpoint request counts over a tumbling window, and flags IPs that
/// cross the configured thresholds. It is safe to share across request
/// handlers; every operation is a short in-memory critical section.
///
/// State is intentionally volatile: a process restart pardons everyone.
#[derive(Clone)]
pub struct SecurityMonitor {
    config: SecurityMonitorConfig,
    state: Arc<Mutex<MonitorState>>,
}

impl Default for SecurityMonitor {
    fn default() -> Self {
        Self::new(SecurityMonitorConfig::default())
    }
}

impl SecurityMonitor {
    /// Create a new monitor with the given configuration
    pub fn new(config: SecurityMonitorConfig) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(MonitorState::default())),
        }
    }

    /// Record a failed login attempt for the given IP
    ///
    /// Returns `true` iff the IP has reached the failure threshold within the
    /// window. On the threshold being reached the IP is flagged as suspicious
    /// and a brute-force audit event is emitted.
    pub fn record_failed_login(&self, ip: &str) -> bool {
        let mut state = self.state.lock().unwrap();
        let now = Instant::now();
        let window = Duration::from_secs(self.config.failed_attempt_window_seconds);

        let attempts = state.failed_attempts.entry(ip.to_string()).or_default();

        // Entries are appended in time order, so pruning stops at the first
        // one still inside the window.
        while let Some(oldest) = attempts.front() {
            if now.duration_since(*oldest) > window {
                attempts.pop_front();
            } else {
                break;
            }
        }

        attempts.push_back(now);
        let count = attempts.len();

        if count >= self.config.max_failed_attempts {
            state.suspicious_ips.insert(ip.to_string());
            SecurityAuditEvent::new(
                SecurityEventType::BruteForceDetected,
                SecuritySeverity::High,
                ip.to_string(),
            )
            .with_details(Some(format!(
                "{} failed attempts in {}s",
                count, self.config.failed_attempt_window_seconds
            )))
            .log();
            return true;
        }

        false
    }

    /// Clear failed attempts and the suspicious flag on successful login
    ///
    /// This is an unconditional pardon: one success erases any number of
    /// prior failures. No-op if the IP has no history.
    pub fn record_successful_login(&self, ip: &str) {
        let mut state = self.state.lock().unwrap();
        state.failed_attempts.remove(ip);
        state.suspicious_ips.remove(ip);
    }

    /// Check if the IP is currently flagged as suspicious
    pub fn is_ip_suspicious(&self, ip: &str) -> bool {
        let state = self.state.lock().unwrap();
        state.suspicious_ips.contains(ip)
    }

    /// Record a request against the (ip, endpoint) anomaly counter
    pub fn record_request(&self, ip: &str, endpoint: &str) {
        let mut state = self.state.lock().unwrap();
        *state
            .request_patterns
            .entry(ip.to_string())
            .or_default()
            .entry(endpoint.to_string())
            .or_default() += 1;
    }

    /// Check whether the (ip, endpoint) request pattern is anomalous
    ///
    /// Returns `true` iff the counter strictly exceeds the configured
    /// threshold. The counter is only reset by [`cleanup_old_data`], which
    /// makes the anomaly window a tumbling one.
    ///
    /// [`cleanup_old_data`]: SecurityMonitor::cleanup_old_data
    pub fn check_anomaly(&self, ip: &str, endpoint: &str) -> bool {
        let state = self.state.lock().unwrap();
        let count = state
            .request_patterns
            .get(ip)
            .and_then(|endpoints| endpoints.get(endpoint))
            .copied()
            .unwrap_or(0);

        if count > self.config.anomaly_threshold {
            warn!(
                target: "security",
                ip_address = %ip,
                endpoint = %endpoint,
                count,
                threshold = self.config.anomaly_threshold,
                "Request anomaly detected"
            );
            return true;
        }

        false
    }

    /// Prune expired monitoring data; call periodically
    ///
    /// Failure logs are pruned entry by entry; an IP whose log empties is
    /// dropped from tracking and loses its suspicious flag. The request
    /// pattern table is cleared wholesale, starting a fresh anomaly window.
    pub fn cleanup_old_data(&self) {
        let mut state = self.state.lock().unwrap();
        let now = Instant::now();
        let window = Duration::from_secs(self.config.failed_attempt_window_seconds);

        let MonitorState {
            failed_attempts,
            suspicious_ips,
            request_patterns,
        } = &mut *state;

        failed_attempts.retain(|ip, attempts| {
            while let Some(oldest) = attempts.front() {
                if now.duration_since(*oldest) > window {
                    attempts.pop_front();
                } else {
                    break;
                }
            }
            if attempts.is_empty() {
                suspicious_ips.remove(ip);
                false
            } else {
                true
            }
        });

        request_patterns.clear();
    }

    /// Get a snapshot of the current monitoring statistics
    pub fn get_stats(&self) -> MonitorStats {
        let state = self.state.lock().unwrap();
        MonitorStats {
            suspicious_ip_count: state.suspicious_ips.len(),
            monitored_ip_count: state.failed_attempts.len(),
            total_pattern_entries: state
                .request_patterns
                .values()
                .map(|endpoints| endpoints.len())
                .sum(),
        }
    }
}

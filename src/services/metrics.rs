//! Metrics collection and Prometheus integration service.

use crate::services::monitor::MonitorStats;
use prometheus::{Counter, CounterVec, Gauge, Opts, Registry, TextEncoder};
use thiserror::Error;

/// Errors from metric registration or rendering
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("security metrics error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Security metrics collector for Prometheus integration
///
/// Counters are bumped at detection and block sites; the gauges mirror the
/// monitor's [`MonitorStats`] snapshot and are refreshed at scrape time.
#[derive(Clone)]
pub struct SecurityMetrics {
    pub registry: Registry,
    pub brute_force_detections_total: Counter,
    pub anomalies_detected_total: Counter,
    pub requests_blocked_total: CounterVec,
    pub suspicious_ips: Gauge,
    pub monitored_ips: Gauge,
    pub request_pattern_entries: Gauge,
}

impl SecurityMetrics {
    /// Create a new metrics collector with its own registry
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let brute_force_detections_total = Counter::new(
            "security_brute_force_detections_total",
            "Total number of brute-force detections",
        )?;

        let anomalies_detected_total = Counter::new(
            "security_anomalies_detected_total",
            "Total number of request-pattern anomalies detected",
        )?;

        // Blocked request counter by block reason
        let requests_blocked_total = CounterVec::new(
            Opts::new(
                "security_requests_blocked_total",
                "Total number of requests blocked by the security monitor",
            ),
            &["reason"],
        )?;

        let suspicious_ips = Gauge::new(
            "security_suspicious_ips",
            "IP addresses currently flagged as suspicious",
        )?;

        let monitored_ips = Gauge::new(
            "security_monitored_ips",
            "IP addresses with tracked failed login attempts",
        )?;

        let request_pattern_entries = Gauge::new(
            "security_request_pattern_entries",
            "Tracked (ip, endpoint) counters in the current anomaly window",
        )?;

        // Register all metrics
        registry.register(Box::new(brute_force_detections_total.clone()))?;
        registry.register(Box::new(anomalies_detected_total.clone()))?;
        registry.register(Box::new(requests_blocked_total.clone()))?;
        registry.register(Box::new(suspicious_ips.clone()))?;
        registry.register(Box::new(monitored_ips.clone()))?;
        registry.register(Box::new(request_pattern_entries.clone()))?;

        Ok(Self {
            registry,
            brute_force_detections_total,
            anomalies_detected_total,
            requests_blocked_total,
            suspicious_ips,
            monitored_ips,
            request_pattern_entries,
        })
    }

    /// Refresh the state gauges from a monitor snapshot
    pub fn update_from_stats(&self, stats: &MonitorStats) {
        self.suspicious_ips.set(stats.suspicious_ip_count as f64);
        self.monitored_ips.set(stats.monitored_ip_count as f64);
        self.request_pattern_entries
            .set(stats.total_pattern_entries as f64);
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        Ok(encoder.encode_to_string(&metric_families)?)
    }
}

//! API response models for the security diagnostic endpoints.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Snapshot of the security monitor's bookkeeping state
///
/// Returned by the stats endpoint. This is the only sanctioned way for other
/// components to observe the monitor's internals.
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct SecurityStatsResponse {
    /// Number of IP addresses currently flagged as suspicious
    pub suspicious_ip_count: usize,
    /// Number of IP addresses with at least one tracked failed login
    pub monitored_ip_count: usize,
    /// Total (ip, endpoint) counters in the current anomaly window
    pub total_pattern_entries: usize,
}

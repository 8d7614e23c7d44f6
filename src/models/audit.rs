//! Security audit event structures and types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Types of security events for audit logging
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityEventType {
    LoginSuccess,
    LoginFailure,
    BruteForceDetected,
    AnomalyDetected,
    RequestBlocked,
}

/// Severity of a security event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecuritySeverity {
    Info,
    Warning,
    High,
}

/// Structured audit log entry for security events
///
/// Events are emitted as structured `tracing` records under the
/// `security_audit` target. Persistence of audit records is handled by the
/// embedding application's log pipeline, not by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityAuditEvent {
    pub event_id: Uuid,
    pub event_type: SecurityEventType,
    pub severity: SecuritySeverity,
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub endpoint: Option<String>,
    pub user_agent: Option<String>,
    pub user_id: Option<String>,
    pub details: Option<String>,
}

impl SecurityAuditEvent {
    /// Create a new audit event with basic information
    pub fn new(
        event_type: SecurityEventType,
        severity: SecuritySeverity,
        ip_address: String,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type,
            severity,
            timestamp: Utc::now(),
            ip_address,
            endpoint: None,
            user_agent: None,
            user_id: None,
            details: None,
        }
    }

    /// Add the endpoint the event was observed on
    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Add user agent information
    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Add user ID information
    pub fn with_user_id(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }

    /// Add free-form detail information
    pub fn with_details(mut self, details: Option<String>) -> Self {
        self.details = details;
        self
    }

    /// Log the audit event using structured logging
    pub fn log(&self) {
        info!(
            target: "security_audit",
            event_id = %self.event_id,
            event_type = ?self.event_type,
            severity = ?self.severity,
            timestamp = %self.timestamp,
            ip_address = %self.ip_address,
            endpoint = ?self.endpoint,
            user_agent = ?self.user_agent,
            user_id = ?self.user_id,
            details = ?self.details,
            "Security audit event"
        );
    }
}

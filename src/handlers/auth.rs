//! Authentication endpoint handlers.

use crate::{
    models::{
        audit::{SecurityAuditEvent, SecurityEventType, SecuritySeverity},
        auth::{LoginRequest, LoginResponse},
    },
    services::{SecurityMetrics, SecurityMonitor},
    utils::http::{extract_client_ip, extract_user_agent},
};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;
use uuid::Uuid;

/// User login endpoint
///
/// Authenticates users with username/password, reporting every outcome to
/// the security monitor: a flagged IP is rejected before credentials are
/// checked, a failure feeds the brute-force detector, and a success pardons
/// the address. Credential verification here is a stand-in - the real user
/// store lives outside this crate.
#[api_v2_operation(
    summary = "User Login",
    description = "Authenticate user and return access token",
    tags("Authentication"),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Login failed", body = LoginResponse),
        (status = 429, description = "Access restricted due to suspicious activity")
    )
)]
pub async fn login(
    req: HttpRequest,
    payload: web::Json<LoginRequest>,
    monitor: web::Data<SecurityMonitor>,
) -> Result<web::Json<LoginResponse>, Error> {
    let ip_address = extract_client_ip(&req);
    let user_agent = extract_user_agent(&req);
    let endpoint = req.uri().path().to_string();

    // Flagged addresses don't get to try credentials at all.
    if monitor.is_ip_suspicious(&ip_address) {
        SecurityAuditEvent::new(
            SecurityEventType::RequestBlocked,
            SecuritySeverity::Warning,
            ip_address,
        )
        .with_endpoint(Some(endpoint))
        .with_user_agent(user_agent)
        .with_details(Some("login attempt from flagged address".to_string()))
        .log();

        if let Some(metrics) = req.app_data::<web::Data<SecurityMetrics>>() {
            metrics
                .requests_blocked_total
                .with_label_values(&["suspicious_ip"])
                .inc();
        }

        return Err(actix_web::error::ErrorTooManyRequests(
            "Access temporarily restricted due to suspicious activity",
        ));
    }

    let success = payload.username == "traveler" && payload.password == "carry-on";

    if success {
        monitor.record_successful_login(&ip_address);

        let token = format!("token_{}", Uuid::new_v4());
        let response = LoginResponse {
            success: true,
            token: Some(token),
            message: "Login successful".to_string(),
        };

        SecurityAuditEvent::new(
            SecurityEventType::LoginSuccess,
            SecuritySeverity::Info,
            ip_address,
        )
        .with_endpoint(Some(endpoint))
        .with_user_id(Some(payload.username.clone()))
        .with_user_agent(user_agent)
        .log();

        Ok(web::Json(response))
    } else {
        let blocked = monitor.record_failed_login(&ip_address);

        if blocked {
            if let Some(metrics) = req.app_data::<web::Data<SecurityMetrics>>() {
                metrics.brute_force_detections_total.inc();
            }
        }

        let response = LoginResponse {
            success: false,
            token: None,
            message: "Invalid credentials".to_string(),
        };

        SecurityAuditEvent::new(
            SecurityEventType::LoginFailure,
            SecuritySeverity::Info,
            ip_address,
        )
        .with_endpoint(Some(endpoint))
        .with_user_id(Some(payload.username.clone()))
        .with_user_agent(user_agent)
        .log();

        Err(actix_web::error::ErrorUnauthorized(
            serde_json::to_string(&response).unwrap(),
        ))
    }
}

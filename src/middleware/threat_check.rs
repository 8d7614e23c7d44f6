//! Per-request threat-check middleware.

use crate::{
    models::audit::{SecurityAuditEvent, SecurityEventType, SecuritySeverity},
    services::{SecurityMetrics, SecurityMonitor},
    utils::http::{extract_client_ip, extract_endpoint, extract_user_agent},
};
use actix_web::{
    Error, HttpResponse,
    body::{BoxBody, MessageBody},
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web,
};
use std::{
    future::{Ready, ready},
    pin::Pin,
};

/// Threat-check middleware factory
///
/// On every inbound request this middleware consults the shared
/// [`SecurityMonitor`]: requests from flagged IPs are rejected with 429
/// before reaching a handler, and every other request is recorded against
/// the per-endpoint anomaly counter and rejected once the counter trips.
///
/// If no monitor is registered in app data the middleware fails open and
/// forwards the request untouched; detection is advisory, not a gate the
/// application can be wedged on.
pub struct ThreatCheck;

impl<S, B> Transform<S, ServiceRequest> for ThreatCheck
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ThreatCheckService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ThreatCheckService { service }))
    }
}

/// The actual threat-check middleware service
pub struct ThreatCheckService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ThreatCheckService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(monitor) = req.app_data::<web::Data<SecurityMonitor>>().cloned() {
            let metrics = req.app_data::<web::Data<SecurityMetrics>>().cloned();
            let ip = extract_client_ip(req.request());
            let endpoint = extract_endpoint(req.request());

            if monitor.is_ip_suspicious(&ip) {
                SecurityAuditEvent::new(
                    SecurityEventType::RequestBlocked,
                    SecuritySeverity::Warning,
                    ip,
                )
                .with_endpoint(Some(endpoint))
                .with_user_agent(extract_user_agent(req.request()))
                .with_details(Some("request from flagged address".to_string()))
                .log();

                if let Some(metrics) = &metrics {
                    metrics
                        .requests_blocked_total
                        .with_label_values(&["suspicious_ip"])
                        .inc();
                }

                let res = req.into_response(HttpResponse::TooManyRequests().json(
                    serde_json::json!({
                        "status": "error",
                        "message": "Access temporarily restricted due to suspicious activity"
                    }),
                ));
                return Box::pin(async move { Ok(res) });
            }

            monitor.record_request(&ip, &endpoint);

            if monitor.check_anomaly(&ip, &endpoint) {
                SecurityAuditEvent::new(
                    SecurityEventType::AnomalyDetected,
                    SecuritySeverity::Warning,
                    ip,
                )
                .with_endpoint(Some(endpoint))
                .with_user_agent(extract_user_agent(req.request()))
                .with_details(Some("endpoint request rate exceeded threshold".to_string()))
                .log();

                if let Some(metrics) = &metrics {
                    metrics.anomalies_detected_total.inc();
                    metrics
                        .requests_blocked_total
                        .with_label_values(&["anomaly"])
                        .inc();
                }

                let res = req.into_response(HttpResponse::TooManyRequests().json(
                    serde_json::json!({
                        "status": "error",
                        "message": "Rate limit exceeded. Please slow down your requests."
                    }),
                ));
                return Box::pin(async move { Ok(res) });
            }
        }

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_boxed_body())
        })
    }
}

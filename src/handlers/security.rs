//! Security diagnostic endpoint handlers.

use crate::{
    models::api::SecurityStatsResponse,
    services::{SecurityMetrics, SecurityMonitor},
};
use actix_web::{Error, HttpRequest, HttpResponse, Result, web};
use paperclip::actix::api_v2_operation;

/// Security monitor statistics endpoint
///
/// Returns a read-only snapshot of the monitor's bookkeeping state, intended
/// for admin dashboards and operational checks.
#[api_v2_operation(
    summary = "Security Monitor Statistics",
    description = "Returns counts of suspicious IPs, monitored IPs, and tracked request patterns.",
    tags("Security"),
    responses(
        (status = 200, description = "Current monitoring statistics", body = SecurityStatsResponse)
    )
)]
pub async fn security_stats(
    monitor: web::Data<SecurityMonitor>,
) -> Result<web::Json<SecurityStatsResponse>, Error> {
    let stats = monitor.get_stats();

    Ok(web::Json(SecurityStatsResponse {
        suspicious_ip_count: stats.suspicious_ip_count,
        monitored_ip_count: stats.monitored_ip_count,
        total_pattern_entries: stats.total_pattern_entries,
    }))
}

/// Prometheus metrics endpoint
///
/// Returns Prometheus-formatted security metrics. The state gauges are
/// refreshed from the monitor at scrape time.
#[api_v2_operation(
    summary = "Prometheus Metrics Endpoint",
    description = "Returns Prometheus-formatted security metrics for scraping.",
    tags("Security"),
    responses(
        (status = 200, description = "Prometheus metrics in text format", content_type = "text/plain"),
        (status = 503, description = "Metrics not available")
    )
)]
pub async fn security_metrics(req: HttpRequest) -> Result<HttpResponse, Error> {
    if let Some(metrics) = req.app_data::<web::Data<SecurityMetrics>>() {
        if let Some(monitor) = req.app_data::<web::Data<SecurityMonitor>>() {
            metrics.update_from_stats(&monitor.get_stats());
        }

        match metrics.render() {
            Ok(output) => Ok(HttpResponse::Ok()
                .content_type("text/plain; version=0.0.4; charset=utf-8")
                .body(output)),
            Err(e) => Err(actix_web::error::ErrorInternalServerError(format!(
                "Failed to render metrics: {}",
                e
            ))),
        }
    } else {
        Err(actix_web::error::ErrorServiceUnavailable(
            "Metrics not available",
        ))
    }
}

//! OpenAPI specification generation and app factory.

use crate::{
    handlers::{login, security_metrics, security_stats},
    middleware::ThreatCheck,
    services::{SecurityMetrics, SecurityMonitor},
};
use actix_web::App;
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Creates the shared OpenAPI specification for the API
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Packwatch".into(),
            version: "1.0.0".into(),
            description: Some(
                "Security monitoring endpoints for the trip-packing API.\n\n\
                ## Threat detection\n\
                Every request passes through an in-process security monitor that tracks\n\
                failed login attempts per client IP over a sliding window and per-endpoint\n\
                request rates over a tumbling window.\n\
                \n\
                **Behavior:**\n\
                - IPs crossing the failed-login threshold are rejected with `429` until\n\
                  a successful login or until their failure history ages out\n\
                - Endpoint request rates above the anomaly threshold are rejected with `429`\n\
                  until the current window resets\n\
                \n\
                **Configuration:**\n\
                - `MONITOR_MAX_FAILED_ATTEMPTS` - failed logins before an IP is flagged (default: 5)\n\
                - `MONITOR_FAILED_ATTEMPT_WINDOW` - failure window in seconds (default: 300)\n\
                - `MONITOR_ANOMALY_THRESHOLD` - per-endpoint requests per window (default: 50)\n\
                - `MONITOR_CLEANUP_INTERVAL` - maintenance cadence in seconds (default: 60)\n\
                \n\
                Detection is advisory and fails open: if the monitor is unavailable,\n\
                requests are allowed through."
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates a basic app wired to the given monitor and metrics
///
/// The monitor and metrics are injected rather than constructed here so that
/// every server worker shares the single process-wide instance. This factory
/// is used both by the binary and by integration tests.
pub fn create_base_app(
    monitor: SecurityMonitor,
    metrics: SecurityMetrics,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(ThreatCheck)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(web::Data::new(monitor))
        .app_data(web::Data::new(metrics))
        .service(web::resource("/auth/login").route(web::post().to(login)))
        .service(web::resource("/api/security/stats").route(web::get().to(security_stats)))
        .service(web::resource("/api/metrics").route(web::get().to(security_metrics)))
        .with_json_spec_at("/api/spec/v2")
        .build()
}

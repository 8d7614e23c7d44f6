use actix_web::{http::StatusCode, test};
use packwatch::{
    LoginRequest, SecurityMetrics, SecurityMonitor, SecurityMonitorConfig, SecurityStatsResponse,
    create_base_app,
};

fn test_monitor(
    max_failed_attempts: usize,
    anomaly_threshold: u64,
) -> (SecurityMonitor, SecurityMetrics) {
    let config = SecurityMonitorConfig {
        max_failed_attempts,
        anomaly_threshold,
        ..Default::default()
    };
    let monitor = SecurityMonitor::new(config);
    let metrics = SecurityMetrics::new().expect("Failed to create security metrics");
    (monitor, metrics)
}

#[actix_web::test]
async fn flagged_ip_is_blocked_on_every_endpoint() {
    let (monitor, metrics) = test_monitor(2, 50);
    let app = test::init_service(create_base_app(monitor.clone(), metrics)).await;

    let login_request = LoginRequest {
        username: "traveler".to_string(),
        password: "wrong".to_string(),
    };

    // Two failed logins reach the threshold.
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/auth/login")
            .insert_header(("X-Real-IP", "203.0.113.50"))
            .set_json(&login_request)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    assert!(monitor.is_ip_suspicious("203.0.113.50"));

    // The flag gates every endpoint, not just the login route.
    let req = test::TestRequest::get()
        .uri("/api/security/stats")
        .insert_header(("X-Real-IP", "203.0.113.50"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    // Other clients are unaffected.
    let req = test::TestRequest::get()
        .uri("/api/security/stats")
        .insert_header(("X-Real-IP", "203.0.113.51"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn endpoint_hammering_trips_the_anomaly_gate() {
    let (monitor, metrics) = test_monitor(5, 5);
    let app = test::init_service(create_base_app(monitor.clone(), metrics)).await;

    for _ in 0..5 {
        let req = test::TestRequest::get()
            .uri("/api/security/stats")
            .insert_header(("X-Real-IP", "198.51.100.20"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // Request six pushes the counter past the threshold and is rejected.
    let req = test::TestRequest::get()
        .uri("/api/security/stats")
        .insert_header(("X-Real-IP", "198.51.100.20"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).unwrap();
    assert!(body_str.contains("slow down"));

    // A cleanup pass starts a fresh window and traffic flows again.
    monitor.cleanup_old_data();
    let req = test::TestRequest::get()
        .uri("/api/security/stats")
        .insert_header(("X-Real-IP", "198.51.100.20"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn successful_login_resets_the_failure_count() {
    let (monitor, metrics) = test_monitor(3, 50);
    let app = test::init_service(create_base_app(monitor.clone(), metrics)).await;

    let bad = LoginRequest {
        username: "traveler".to_string(),
        password: "wrong".to_string(),
    };
    let good = LoginRequest {
        username: "traveler".to_string(),
        password: "carry-on".to_string(),
    };

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/auth/login")
            .insert_header(("X-Real-IP", "198.51.100.30"))
            .set_json(&bad)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .insert_header(("X-Real-IP", "198.51.100.30"))
        .set_json(&good)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The pardon wiped the two earlier failures: two more do not flag.
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/auth/login")
            .insert_header(("X-Real-IP", "198.51.100.30"))
            .set_json(&bad)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
    assert!(!monitor.is_ip_suspicious("198.51.100.30"));

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .insert_header(("X-Real-IP", "198.51.100.30"))
        .set_json(&bad)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(monitor.is_ip_suspicious("198.51.100.30"));
}

#[actix_web::test]
async fn stats_endpoint_reports_the_monitor_snapshot() {
    let (monitor, metrics) = test_monitor(2, 50);
    let app = test::init_service(create_base_app(monitor.clone(), metrics)).await;

    monitor.record_failed_login("203.0.113.60");
    monitor.record_failed_login("203.0.113.61");
    monitor.record_failed_login("203.0.113.61");

    let req = test::TestRequest::get()
        .uri("/api/security/stats")
        .insert_header(("X-Real-IP", "198.51.100.40"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let stats: SecurityStatsResponse =
        serde_json::from_slice(&body).expect("Failed to parse response as JSON");

    assert_eq!(stats.monitored_ip_count, 2);
    assert_eq!(stats.suspicious_ip_count, 1);
    // The stats request itself is tracked in the pattern table.
    assert_eq!(stats.total_pattern_entries, 1);
}

#[actix_web::test]
async fn metrics_endpoint_renders_security_metrics() {
    let (monitor, metrics) = test_monitor(1, 50);
    let app = test::init_service(create_base_app(monitor.clone(), metrics)).await;

    // One failed login flags the IP; its next request is blocked and counted.
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .insert_header(("X-Real-IP", "203.0.113.70"))
        .set_json(LoginRequest {
            username: "traveler".to_string(),
            password: "wrong".to_string(),
        })
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/security/stats")
        .insert_header(("X-Real-IP", "203.0.113.70"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    let req = test::TestRequest::get()
        .uri("/api/metrics")
        .insert_header(("X-Real-IP", "203.0.113.71"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).unwrap();
    assert!(body_str.contains("security_brute_force_detections_total 1"));
    assert!(body_str.contains("security_suspicious_ips 1"));
    assert!(
        body_str
            .contains("security_requests_blocked_total{reason=\"suspicious_ip\"} 1")
    );
}

use actix_web::HttpServer;
use packwatch::{CleanupTask, SecurityMetrics, SecurityMonitor, SecurityMonitorConfig, create_base_app};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize structured logging (run with RUST_LOG=info, for example)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SecurityMonitorConfig::from_env();

    // One monitor instance shared by every server worker and the cleanup
    // task; per-worker instances would each see only a slice of the traffic.
    let monitor = SecurityMonitor::new(config.clone());
    let metrics = SecurityMetrics::new().expect("Failed to create security metrics");

    let cleanup = CleanupTask::spawn(
        monitor.clone(),
        Duration::from_secs(config.cleanup_interval_seconds),
    );

    println!("Server running at http://127.0.0.1:8080");

    let server_monitor = monitor.clone();
    let server_metrics = metrics.clone();
    HttpServer::new(move || create_base_app(server_monitor.clone(), server_metrics.clone()))
        .bind("127.0.0.1:8080")?
        .run()
        .await?;

    // Server is down; stop the maintenance task before exiting.
    cleanup.shutdown().await;

    Ok(())
}

//! Periodic maintenance task for the security monitor.

use crate::services::monitor::SecurityMonitor;
use std::time::Duration;
use tokio::{sync::watch, task::JoinHandle, time};
use tracing::{debug, info};

/// Handle to the background cleanup task
///
/// Ticks on a fixed interval and calls [`SecurityMonitor::cleanup_old_data`]
/// until shut down. The monitor never spawns this itself; the embedding
/// application owns the task and is responsible for stopping it at shutdown.
pub struct CleanupTask {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl CleanupTask {
    /// Spawn the cleanup task on the current Tokio runtime
    ///
    /// The first cleanup pass runs one full interval after spawning.
    pub fn spawn(monitor: SecurityMonitor, interval: Duration) -> Self {
        let (shutdown, mut stop_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
            // An interval's first tick completes immediately; consume it so
            // cleanup runs on the configured cadence from the start.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        monitor.cleanup_old_data();
                        debug!(target: "security", "cleanup pass completed");
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!(target: "security", "cleanup task stopped");
        });

        Self { shutdown, handle }
    }

    /// Signal the task to stop and wait for it to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}

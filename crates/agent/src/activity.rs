//! Connection-activity tracking for the stdio transport.
//!
//! stdio gives us exactly one peer, so the tracker models a single
//! connection: when it was opened, when it last did something, and whether
//! it still counts as active. Two interval tasks keep the picture fresh, a
//! status refresh and a heartbeat, both owned by the caller and aborted on
//! shutdown.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use metrics::gauge;
use tokio::task::JoinHandle;
use tracing::debug;

use labvault_common::config::AgentConfig;
use labvault_common::metrics::METRICS_PREFIX;

pub struct ActivityTracker {
    connection_id: String,
    started: Instant,
    last_activity: Mutex<Instant>,
}

impl ActivityTracker {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            connection_id: format!("stdio-{}", chrono::Utc::now().timestamp_millis()),
            started: now,
            last_activity: Mutex::new(now),
        }
    }

    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    /// Record that the peer just did something (a tool call, usually).
    pub fn touch(&self) {
        if let Ok(mut last) = self.last_activity.lock() {
            *last = Instant::now();
        }
    }

    pub fn idle_for(&self) -> Duration {
        self.last_activity
            .lock()
            .map(|last| last.elapsed())
            .unwrap_or_default()
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    fn set_active(&self, active: bool) {
        gauge!(format!("{}_agent_connection_active", METRICS_PREFIX))
            .set(if active { 1.0 } else { 0.0 });
    }
}

impl Default for ActivityTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles for the tracker's interval tasks.
pub struct ActivityIntervals {
    tracker: std::sync::Arc<ActivityTracker>,
    handles: Vec<JoinHandle<()>>,
}

impl ActivityIntervals {
    /// Spawn the refresh and heartbeat tasks.
    pub fn spawn(tracker: std::sync::Arc<ActivityTracker>, config: &AgentConfig) -> Self {
        tracker.set_active(true);

        let refresh = {
            let tracker = tracker.clone();
            let period = Duration::from_secs(config.activity_refresh_secs.max(1));
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(period);
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    debug!(
                        connection = tracker.connection_id(),
                        idle_secs = tracker.idle_for().as_secs(),
                        uptime_secs = tracker.uptime().as_secs(),
                        "connection status"
                    );
                }
            })
        };

        let heartbeat = {
            let tracker = tracker.clone();
            let period = Duration::from_secs(config.activity_heartbeat_secs.max(1));
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(period);
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    tracker.set_active(true);
                }
            })
        };

        Self {
            tracker,
            handles: vec![refresh, heartbeat],
        }
    }

    /// Stop both tasks and mark the connection closed.
    pub fn shutdown(self) {
        for handle in &self.handles {
            handle.abort();
        }
        self.tracker.set_active(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_touch_resets_idle_time() {
        let tracker = ActivityTracker::new();
        std::thread::sleep(Duration::from_millis(20));
        assert!(tracker.idle_for() >= Duration::from_millis(10));

        tracker.touch();
        assert!(tracker.idle_for() < Duration::from_millis(10));
    }

    #[test]
    fn test_connection_id_is_stdio_scoped() {
        let tracker = ActivityTracker::new();
        assert!(tracker.connection_id().starts_with("stdio-"));
    }

    #[tokio::test]
    async fn test_intervals_spawn_and_shutdown() {
        let tracker = Arc::new(ActivityTracker::new());
        let intervals = ActivityIntervals::spawn(
            tracker.clone(),
            &AgentConfig {
                activity_refresh_secs: 1,
                activity_heartbeat_secs: 1,
            },
        );
        intervals.shutdown();
    }
}

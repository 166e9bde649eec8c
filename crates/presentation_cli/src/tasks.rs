//! Periodic refresh of the monitored stops

use std::sync::Arc;
use std::time::Duration;

use application::{MonitorSnapshot, StopRegistry};
use tracing::{debug, info, warn};

/// Spawn a background task that refreshes every stop at `interval`.
///
/// The first tick is skipped since stops are refreshed once when they are
/// added. Failed refreshes are logged and leave the stop's previous snapshot
/// in place. Pending stops are retried on every tick and reported through
/// `on_snapshot` once they deliver departures.
///
/// Returns a `JoinHandle` that can be used to abort the task on shutdown.
pub fn spawn_refresh_task<F>(
    registry: Arc<StopRegistry>,
    interval: Duration,
    on_snapshot: F,
) -> tokio::task::JoinHandle<()>
where
    F: Fn(&str, &MonitorSnapshot) + Send + Sync + 'static,
{
    info!(
        interval_secs = interval.as_secs(),
        stops = registry.len(),
        "Starting refresh task"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            refresh_all(&registry, &on_snapshot).await;
        }
    })
}

/// One refresh round over all stops; returns how many delivered a snapshot
pub async fn refresh_all<F>(registry: &StopRegistry, on_snapshot: &F) -> usize
where
    F: Fn(&str, &MonitorSnapshot),
{
    let mut refreshed = 0;
    for stop in registry.stops() {
        match stop.summary.refresh().await {
            Ok(snapshot) => {
                debug!(
                    stop_id = %stop.summary.stop_id(),
                    nearest = %snapshot.nearest.summary,
                    "Stop refreshed"
                );
                on_snapshot(&stop.title, &snapshot);
                refreshed += 1;
            },
            Err(e) => {
                warn!(stop_id = %stop.summary.stop_id(), error = %e, "Refresh failed");
            },
        }
    }

    for stop in registry.retry_pending().await {
        if let Some(snapshot) = stop.summary.snapshot() {
            on_snapshot(&stop.title, &snapshot);
            refreshed += 1;
        }
    }
    refreshed
}

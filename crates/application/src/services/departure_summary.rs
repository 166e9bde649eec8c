//! Departure summary of one monitored stop
//!
//! Holds the last successful snapshot of a stop and derives the nearest
//! departure from it. Snapshots are immutable and replaced as a whole, so
//! readers never observe a half-updated state.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use domain::{Departure, DirectionFilter, StopId, TimeWindow};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::DeparturePort;

/// The departure closest in time, as derived from a departure list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NearestDeparture {
    /// `(<left> min) <type> <num> (<to>)`
    pub summary: String,
    /// Minutes until departure
    pub left: i64,
    /// Delay in minutes
    pub delay: i64,
}

impl From<&Departure> for NearestDeparture {
    fn from(departure: &Departure) -> Self {
        Self {
            summary: departure.summary(),
            left: departure.left,
            delay: departure.delay,
        }
    }
}

/// Everything known about a stop after one successful refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorSnapshot {
    /// The monitored stop
    pub stop_id: StopId,
    /// Departures within the time window, upstream order
    pub departures: Vec<Departure>,
    /// When the departures were fetched
    pub last_updated: DateTime<Utc>,
    /// Derived from the first departure
    pub nearest: NearestDeparture,
}

impl MonitorSnapshot {
    /// Build a snapshot; `None` if there is no departure to derive from
    #[must_use]
    pub fn from_departures(
        stop_id: StopId,
        departures: Vec<Departure>,
        last_updated: DateTime<Utc>,
    ) -> Option<Self> {
        let nearest = NearestDeparture::from(departures.first()?);
        Some(Self {
            stop_id,
            departures,
            last_updated,
            nearest,
        })
    }
}

/// Last-known departure state of one stop
pub struct DepartureSummary {
    port: Arc<dyn DeparturePort>,
    stop_id: StopId,
    window: TimeWindow,
    direction: DirectionFilter,
    snapshot: ArcSwapOption<MonitorSnapshot>,
    refresh_lock: Mutex<()>,
}

impl fmt::Debug for DepartureSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DepartureSummary")
            .field("stop_id", &self.stop_id)
            .field("window", &self.window)
            .field("direction", &self.direction)
            .field("populated", &self.is_populated())
            .finish_non_exhaustive()
    }
}

impl DepartureSummary {
    /// Create an uninitialized summary for a stop
    pub fn new(
        port: Arc<dyn DeparturePort>,
        stop_id: StopId,
        window: TimeWindow,
        direction: DirectionFilter,
    ) -> Self {
        Self {
            port,
            stop_id,
            window,
            direction,
            snapshot: ArcSwapOption::empty(),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Fetch departures and replace the snapshot
    ///
    /// Concurrent calls for the same stop are serialized. On error the
    /// previous snapshot stays in place.
    #[instrument(skip(self), fields(stop_id = %self.stop_id, window = %self.window))]
    pub async fn refresh(&self) -> Result<Arc<MonitorSnapshot>, ApplicationError> {
        let _guard = self.refresh_lock.lock().await;

        let departures: Vec<Departure> = self
            .port
            .departures(&self.stop_id, self.window)
            .await?
            .into_iter()
            .filter(|departure| self.direction.matches(&departure.to))
            .collect();

        let snapshot = MonitorSnapshot::from_departures(self.stop_id.clone(), departures, Utc::now())
            .map(Arc::new)
            .ok_or_else(|| ApplicationError::EmptyResult {
                stop_id: self.stop_id.clone(),
            })?;

        self.snapshot.store(Some(Arc::clone(&snapshot)));

        debug!(
            nearest = %snapshot.nearest.summary,
            count = snapshot.departures.len(),
            "Snapshot updated"
        );
        Ok(snapshot)
    }

    /// The current snapshot, if any refresh has succeeded yet
    pub fn snapshot(&self) -> Option<Arc<MonitorSnapshot>> {
        self.snapshot.load_full()
    }

    /// Whether a refresh has succeeded at least once
    pub fn is_populated(&self) -> bool {
        self.snapshot.load().is_some()
    }

    /// The monitored stop
    pub const fn stop_id(&self) -> &StopId {
        &self.stop_id
    }

    /// Text of the nearest departure
    pub fn nearest_summary(&self) -> Option<String> {
        self.snapshot().map(|s| s.nearest.summary.clone())
    }

    /// Minutes until the nearest departure
    pub fn nearest_left_minutes(&self) -> Option<i64> {
        self.snapshot().map(|s| s.nearest.left)
    }

    /// Delay of the nearest departure in minutes
    pub fn nearest_delay_minutes(&self) -> Option<i64> {
        self.snapshot().map(|s| s.nearest.delay)
    }

    /// Departures of the current snapshot; empty before the first refresh
    pub fn departures(&self) -> Vec<Departure> {
        self.snapshot()
            .map(|s| s.departures.clone())
            .unwrap_or_default()
    }

    /// When the current snapshot was fetched
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.snapshot().map(|s| s.last_updated)
    }
}

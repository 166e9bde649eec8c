//! Registry of monitored stops
//!
//! A stop whose first refresh fails is kept as pending and retried by
//! [`StopRegistry::retry_pending`] until upstream delivers departures.

use std::sync::Arc;

use domain::StopId;
use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use super::departure_summary::DepartureSummary;
use super::stop_setup::ValidatedStop;
use crate::error::ApplicationError;
use crate::ports::DeparturePort;

/// A monitored stop
#[derive(Debug, Clone)]
pub struct RegisteredStop {
    /// Display name of the stop
    pub title: String,
    /// Last-known departures of the stop
    pub summary: Arc<DepartureSummary>,
}

#[derive(Default)]
struct Entries {
    ready: Vec<RegisteredStop>,
    pending: Vec<RegisteredStop>,
}

impl Entries {
    fn contains(&self, stop_id: &StopId) -> bool {
        self.ready
            .iter()
            .chain(&self.pending)
            .any(|entry| entry.summary.stop_id() == stop_id)
    }

    /// Move a pending stop to the ready list; `false` if it is gone
    fn promote(&mut self, stop_id: &StopId) -> bool {
        let Some(index) = self
            .pending
            .iter()
            .position(|entry| entry.summary.stop_id() == stop_id)
        else {
            return false;
        };
        let entry = self.pending.remove(index);
        self.ready.push(entry);
        true
    }
}

/// Monitored stops in the order they became ready
pub struct StopRegistry {
    port: Arc<dyn DeparturePort>,
    entries: RwLock<Entries>,
}

impl std::fmt::Debug for StopRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.read();
        f.debug_struct("StopRegistry")
            .field("ready", &entries.ready.len())
            .field("pending", &entries.pending.len())
            .finish_non_exhaustive()
    }
}

impl StopRegistry {
    /// Create an empty registry fetching through `port`
    pub fn new(port: Arc<dyn DeparturePort>) -> Self {
        Self {
            port,
            entries: RwLock::new(Entries::default()),
        }
    }

    /// Register a stop and refresh it once
    ///
    /// If the first refresh fails the stop stays registered as pending and
    /// `NotReady` is returned; [`Self::retry_pending`] picks it up later.
    #[instrument(skip(self, stop), fields(stop_id = %stop.stop_id))]
    pub async fn add(&self, stop: ValidatedStop) -> Result<Arc<DepartureSummary>, ApplicationError> {
        let summary = Arc::new(DepartureSummary::new(
            Arc::clone(&self.port),
            stop.stop_id.clone(),
            stop.window,
            stop.direction,
        ));

        {
            let mut entries = self.entries.write();
            if entries.contains(&stop.stop_id) {
                return Err(ApplicationError::AlreadyConfigured(stop.stop_id));
            }
            entries.pending.push(RegisteredStop {
                title: stop.title.clone(),
                summary: Arc::clone(&summary),
            });
        }

        if let Err(e) = summary.refresh().await {
            warn!(error = %e, "First refresh failed, stop is pending");
            return Err(ApplicationError::NotReady {
                stop_id: stop.stop_id,
                source: Box::new(e),
            });
        }

        let ready = self.entries.write().promote(&stop.stop_id);
        if ready {
            info!(title = %stop.title, "Stop registered");
        }
        Ok(summary)
    }

    /// Refresh every pending stop once; returns the stops that became ready
    pub async fn retry_pending(&self) -> Vec<RegisteredStop> {
        let pending = self.pending();
        let mut promoted = Vec::new();

        for stop in pending {
            match stop.summary.refresh().await {
                Ok(_) => {
                    let ready = self.entries.write().promote(stop.summary.stop_id());
                    if ready {
                        info!(
                            stop_id = %stop.summary.stop_id(),
                            title = %stop.title,
                            "Pending stop is ready"
                        );
                        promoted.push(stop);
                    }
                },
                Err(e) => {
                    debug!(stop_id = %stop.summary.stop_id(), error = %e, "Stop still pending");
                },
            }
        }
        promoted
    }

    /// Stop monitoring a stop; `false` if it was not registered
    pub fn remove(&self, stop_id: &StopId) -> bool {
        let mut entries = self.entries.write();
        let before = entries.ready.len() + entries.pending.len();
        entries.ready.retain(|entry| entry.summary.stop_id() != stop_id);
        entries
            .pending
            .retain(|entry| entry.summary.stop_id() != stop_id);
        before != entries.ready.len() + entries.pending.len()
    }

    /// Summary of a ready stop
    pub fn get(&self, stop_id: &StopId) -> Option<Arc<DepartureSummary>> {
        self.entries
            .read()
            .ready
            .iter()
            .find(|entry| entry.summary.stop_id() == stop_id)
            .map(|entry| Arc::clone(&entry.summary))
    }

    /// Whether the stop is registered, ready or pending
    pub fn contains(&self, stop_id: &StopId) -> bool {
        self.entries.read().contains(stop_id)
    }

    /// Summaries of the ready stops
    pub fn summaries(&self) -> Vec<Arc<DepartureSummary>> {
        self.entries
            .read()
            .ready
            .iter()
            .map(|entry| Arc::clone(&entry.summary))
            .collect()
    }

    /// Ready stops, in the order they became ready
    pub fn stops(&self) -> Vec<RegisteredStop> {
        self.entries.read().ready.clone()
    }

    /// Stops still waiting for their first successful refresh
    pub fn pending(&self) -> Vec<RegisteredStop> {
        self.entries.read().pending.clone()
    }

    /// Number of registered stops, pending ones included
    pub fn len(&self) -> usize {
        let entries = self.entries.read();
        entries.ready.len() + entries.pending.len()
    }

    /// Whether no stop is registered at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

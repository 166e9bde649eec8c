//! Departure information port
//!
//! Defines how the application reaches the upstream departure monitor.

use async_trait::async_trait;
use domain::{Departure, StopId, StopMatch, StopValidation, TimeWindow};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for stop lookup and departure monitoring
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeparturePort: Send + Sync {
    /// Search stops by free-text keyword
    async fn find_stops(&self, keyword: &str) -> Result<Vec<StopMatch>, ApplicationError>;

    /// Check whether the upstream system knows a stop
    async fn validate_stop(&self, stop_id: &StopId) -> Result<StopValidation, ApplicationError>;

    /// Departures leaving within `window`, in upstream order
    ///
    /// An unreachable upstream yields an empty list, not an error.
    async fn departures(
        &self,
        stop_id: &StopId,
        window: TimeWindow,
    ) -> Result<Vec<Departure>, ApplicationError>;
}

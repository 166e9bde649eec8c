//! VVM adapter - Implements DeparturePort using integration_vvm

use application::error::ApplicationError;
use application::ports::DeparturePort;
use async_trait::async_trait;
use domain::{Departure, StopId, StopMatch, StopValidation, TimeWindow};
use integration_vvm::{DepartureClient, StopMonitor, VvmConfig, VvmError};
use tracing::{debug, instrument};

/// Adapter for the VVM departure monitor
#[derive(Debug)]
pub struct VvmDepartureAdapter<C = StopMonitor> {
    client: C,
}

impl VvmDepartureAdapter {
    /// Create an adapter talking to the configured VVM backend
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &VvmConfig) -> Result<Self, ApplicationError> {
        let client = StopMonitor::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }
}

impl<C: DepartureClient> VvmDepartureAdapter<C> {
    /// Wrap any departure client
    pub const fn with_client(client: C) -> Self {
        Self { client }
    }

    fn map_error(e: VvmError) -> ApplicationError {
        match e {
            VvmError::MalformedResponse(detail) => ApplicationError::MalformedResponse(detail),
            VvmError::ConfigurationError(detail) => ApplicationError::Configuration(detail),
            VvmError::InvalidQuery(detail) => ApplicationError::Domain(
                domain::DomainError::ValidationError(detail),
            ),
            VvmError::ClientInit(detail) => {
                ApplicationError::ExternalService(format!("VVM client unavailable: {detail}"))
            },
        }
    }
}

#[async_trait]
impl<C: DepartureClient> DeparturePort for VvmDepartureAdapter<C> {
    #[instrument(skip(self))]
    async fn find_stops(&self, keyword: &str) -> Result<Vec<StopMatch>, ApplicationError> {
        let stops = self
            .client
            .find_stops(keyword)
            .await
            .map_err(Self::map_error)?;
        debug!(count = stops.len(), "Stop search finished");
        Ok(stops)
    }

    #[instrument(skip(self), fields(stop_id = %stop_id))]
    async fn validate_stop(&self, stop_id: &StopId) -> Result<StopValidation, ApplicationError> {
        self.client
            .is_stop_valid(stop_id)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self), fields(stop_id = %stop_id, window = %window))]
    async fn departures(
        &self,
        stop_id: &StopId,
        window: TimeWindow,
    ) -> Result<Vec<Departure>, ApplicationError> {
        self.client
            .get_departures(stop_id, window)
            .await
            .map_err(Self::map_error)
    }
}

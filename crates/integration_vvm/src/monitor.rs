//! Departure monitor for a single stop
//!
//! Builds the `XML_DM_REQUEST` query, decides whether a stop id is known
//! upstream and reduces the raw departure list to [`Departure`] records.

use async_trait::async_trait;
use domain::{Departure, StopId, StopMatch, StopValidation, TimeWindow};
use tracing::{debug, instrument};

use crate::client::{DEPARTURE_MONITOR_ENDPOINT, VvmAccessApi};
use crate::config::VvmConfig;
use crate::error::VvmError;
use crate::models::DmResponse;

/// Trait for departure-monitor clients
#[async_trait]
pub trait DepartureClient: Send + Sync {
    /// Search stops by keyword
    async fn find_stops(&self, keyword: &str) -> Result<Vec<StopMatch>, VvmError>;

    /// Check whether the upstream system knows `stop_id`
    async fn is_stop_valid(&self, stop_id: &StopId) -> Result<StopValidation, VvmError>;

    /// Departures of `stop_id` leaving within `window`, in upstream order
    async fn get_departures(
        &self,
        stop_id: &StopId,
        window: TimeWindow,
    ) -> Result<Vec<Departure>, VvmError>;
}

/// EFA departure monitor on top of [`VvmAccessApi`]
#[derive(Debug, Clone)]
pub struct StopMonitor {
    api: VvmAccessApi,
}

impl StopMonitor {
    /// Create a monitor with its own access client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &VvmConfig) -> Result<Self, VvmError> {
        Ok(Self::with_api(VvmAccessApi::new(config)?))
    }

    /// Create a monitor sharing an existing access client
    #[must_use]
    pub const fn with_api(api: VvmAccessApi) -> Self {
        Self { api }
    }

    /// Fixed query of the departure monitor for one stop
    fn departure_params(stop_id: &StopId) -> [(&'static str, String); 8] {
        [
            ("useRealtime", "1".to_string()),
            ("mode", "direct".to_string()),
            ("name_dm", stop_id.as_str().to_string()),
            ("type_dm", "stop".to_string()),
            ("useAllStops", "1".to_string()),
            ("mergeDep", "1".to_string()),
            ("maxTimeLoop", "2".to_string()),
            ("outputFormat", "json".to_string()),
        ]
    }

    /// Raw departure-monitor answer for a stop, `None` if there is no data
    #[instrument(skip(self), fields(stop_id = %stop_id))]
    pub async fn request_departures(
        &self,
        stop_id: &StopId,
    ) -> Result<Option<DmResponse>, VvmError> {
        self.api
            .fetch(DEPARTURE_MONITOR_ENDPOINT, &Self::departure_params(stop_id))
            .await
    }

    /// Classify a departure-monitor answer
    fn validation_from_response(response: Option<&DmResponse>) -> Result<StopValidation, VvmError> {
        let Some(response) = response else {
            return Ok(StopValidation::Unknown);
        };

        if !response.departure_list.is_empty() {
            return Ok(StopValidation::Valid {
                name: response.resolved_stop_name().map(str::to_string),
            });
        }

        let messages = response.messages();
        if messages.is_empty() {
            return Ok(StopValidation::Unknown);
        }

        let mut code: Option<i64> = None;
        let mut message: Option<String> = None;
        for entry in messages {
            match entry.name.as_str() {
                "code" => {
                    let raw = entry.value.as_deref().unwrap_or_default();
                    let parsed = raw.trim().parse::<i64>().map_err(|_| {
                        VvmError::MalformedResponse(format!("message code is not an integer: {raw:?}"))
                    })?;
                    code = Some(parsed);
                },
                "error" => message.clone_from(&entry.value),
                _ => {},
            }
        }

        Ok(StopValidation::Invalid { code, message })
    }

    /// Keep entries leaving within `window` and map them to [`Departure`]
    fn departures_from_response(response: Option<DmResponse>, window: TimeWindow) -> Vec<Departure> {
        response.map_or_else(Vec::new, |response| {
            response
                .departure_list
                .into_iter()
                .filter(|raw| window.contains(raw.countdown))
                .map(Departure::from)
                .collect()
        })
    }
}

#[async_trait]
impl DepartureClient for StopMonitor {
    async fn find_stops(&self, keyword: &str) -> Result<Vec<StopMatch>, VvmError> {
        self.api.find_stops(keyword).await
    }

    #[instrument(skip(self), fields(stop_id = %stop_id))]
    async fn is_stop_valid(&self, stop_id: &StopId) -> Result<StopValidation, VvmError> {
        let response = self.request_departures(stop_id).await?;
        let validation = Self::validation_from_response(response.as_ref())?;
        debug!(?validation, "Stop checked");
        Ok(validation)
    }

    #[instrument(skip(self), fields(stop_id = %stop_id, window = %window))]
    async fn get_departures(
        &self,
        stop_id: &StopId,
        window: TimeWindow,
    ) -> Result<Vec<Departure>, VvmError> {
        let response = self.request_departures(stop_id).await?;
        let departures = Self::departures_from_response(response, window);
        debug!(count = departures.len(), "Departures within window");
        Ok(departures)
    }
}

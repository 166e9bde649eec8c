//! Low-level access to the VVM EFA endpoints
//!
//! One GET per call, JSON in, typed value or "absent" out.

use std::time::Duration;

use domain::StopMatch;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::VvmConfig;
use crate::error::VvmError;
use crate::models::StopFinderResponse;

/// Stop search endpoint
pub const STOP_FINDER_ENDPOINT: &str = "XML_STOPFINDER_REQUEST";

/// Departure monitor endpoint
pub const DEPARTURE_MONITOR_ENDPOINT: &str = "XML_DM_REQUEST";

/// HTTP access to the VVM backend
#[derive(Debug, Clone)]
pub struct VvmAccessApi {
    client: Client,
    config: VvmConfig,
}

impl VvmAccessApi {
    /// Create a new access client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &VvmConfig) -> Result<Self, VvmError> {
        config.validate().map_err(VvmError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("vvm-monitor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| VvmError::ClientInit(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Issue a GET against `endpoint` and decode the JSON body
    ///
    /// Returns `Ok(None)` when the server answers with anything but 200 or
    /// cannot be reached at all.
    ///
    /// # Errors
    ///
    /// Returns [`VvmError::MalformedResponse`] if a 200 body does not decode
    /// into `T`.
    #[instrument(skip(self, params))]
    pub async fn fetch<T>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Option<T>, VvmError>
    where
        T: DeserializeOwned,
    {
        let url = self.config.endpoint_url(endpoint);

        debug!(?url, "Requesting");

        let response = match self.client.get(&url).query(params).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Request failed, treating as no data");
                return Ok(None);
            },
        };

        let status = response.status();
        if status != StatusCode::OK {
            debug!(%status, "Non-200 answer, treating as no data");
            return Ok(None);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Failed to read response body, treating as no data");
                return Ok(None);
            },
        };

        let decoded = serde_json::from_str(&body).map_err(|e| {
            warn!(
                error = %e,
                body = %body.chars().take(300).collect::<String>(),
                "Response does not match the expected schema"
            );
            VvmError::from(e)
        })?;

        Ok(Some(decoded))
    }

    /// Search stops by free-text keyword
    ///
    /// Only exact stop hits are returned; streets, addresses and POIs are
    /// dropped. An unreachable backend yields an empty list.
    #[instrument(skip(self))]
    pub async fn find_stops(&self, keyword: &str) -> Result<Vec<StopMatch>, VvmError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(VvmError::InvalidQuery(
                "Search keyword must not be empty".to_string(),
            ));
        }

        let params = [
            ("name_sf", keyword.to_string()),
            ("regionID_sf", "1".to_string()),
            ("type_sf", "any".to_string()),
            ("outputFormat", "json".to_string()),
        ];

        let Some(response) = self
            .fetch::<StopFinderResponse>(STOP_FINDER_ENDPOINT, &params)
            .await?
        else {
            return Ok(Vec::new());
        };

        let stops = response
            .stop_finder
            .points
            .into_iter()
            .filter(|point| point.is_stop())
            .map(|point| point.into_stop_match())
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = stops.len(), "Stops found");
        Ok(stops)
    }
}

//! Stop setup validation
//!
//! Checks an operator-supplied stop configuration before the stop is
//! monitored.

use std::sync::Arc;

use domain::{DirectionFilter, StopId, StopValidation, TimeWindow};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::DeparturePort;

/// Stop configuration as entered by an operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopConfigInput {
    /// Stop identifier, surrounding whitespace allowed
    pub stop_id: String,
    /// Minutes ahead to show departures for
    #[serde(default = "default_timeframe")]
    pub timeframe: i64,
    /// Destination substring filter; empty shows all
    #[serde(default)]
    pub direction: String,
}

fn default_timeframe() -> i64 {
    i64::from(TimeWindow::SETUP_DEFAULT_MINUTES)
}

impl StopConfigInput {
    /// Input with the setup defaults for time frame and direction
    pub fn new(stop_id: impl Into<String>) -> Self {
        Self {
            stop_id: stop_id.into(),
            timeframe: default_timeframe(),
            direction: String::new(),
        }
    }

    /// Set the time frame in minutes
    #[must_use]
    pub const fn with_timeframe(mut self, timeframe: i64) -> Self {
        self.timeframe = timeframe;
        self
    }

    /// Set the destination filter
    #[must_use]
    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = direction.into();
        self
    }
}

/// A stop configuration ready to be monitored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedStop {
    /// Resolved stop name, or the stop id if none was reported
    pub title: String,
    /// Normalized stop identifier
    pub stop_id: StopId,
    /// How far ahead departures are kept
    pub window: TimeWindow,
    /// Destination filter applied on every refresh
    pub direction: DirectionFilter,
}

impl TryFrom<&StopConfigInput> for ValidatedStop {
    type Error = ApplicationError;

    /// Check the input without asking upstream; the title is the stop id
    fn try_from(input: &StopConfigInput) -> Result<Self, Self::Error> {
        if input.timeframe <= 0 {
            return Err(ApplicationError::InvalidTimeframe(input.timeframe));
        }
        let window = TimeWindow::new(input.timeframe)?;
        let stop_id = StopId::new(input.stop_id.as_str())?;
        Ok(Self {
            title: stop_id.to_string(),
            stop_id,
            window,
            direction: DirectionFilter::new(input.direction.as_str()),
        })
    }
}

/// Validates stop configurations against the departure monitor
#[derive(Clone)]
pub struct StopSetupService {
    port: Arc<dyn DeparturePort>,
}

impl std::fmt::Debug for StopSetupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopSetupService").finish_non_exhaustive()
    }
}

impl StopSetupService {
    /// Create a service validating through `port`
    pub fn new(port: Arc<dyn DeparturePort>) -> Self {
        Self { port }
    }

    /// Validate a stop configuration
    ///
    /// The time frame and stop id are checked before anything is sent
    /// upstream.
    #[instrument(skip(self), fields(stop_id = %input.stop_id, timeframe = input.timeframe))]
    pub async fn validate_stop(
        &self,
        input: &StopConfigInput,
    ) -> Result<ValidatedStop, ApplicationError> {
        let checked = ValidatedStop::try_from(input)?;
        let stop_id = checked.stop_id.clone();

        match self.port.validate_stop(&stop_id).await? {
            StopValidation::Valid { name } => {
                let title = name.unwrap_or(checked.title);
                info!(%title, "Stop accepted");
                Ok(ValidatedStop { title, ..checked })
            },
            StopValidation::Invalid { code, message } => {
                warn!(?code, ?message, "Stop rejected upstream");
                Err(ApplicationError::InvalidStopId {
                    stop_id: stop_id.into(),
                    code,
                    message,
                })
            },
            StopValidation::Unknown => {
                warn!("Stop could not be resolved");
                Err(ApplicationError::InvalidStopId {
                    stop_id: stop_id.into(),
                    code: None,
                    message: None,
                })
            },
        }
    }
}

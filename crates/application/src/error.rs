//! Application-level errors

use domain::{DomainError, StopId};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// The upstream answer did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Configured time window is not positive
    #[error("Invalid time frame: cannot be <= 0")]
    InvalidTimeframe(i64),

    /// Stop id does not resolve upstream
    #[error("Invalid stop id:{stop_id}{}", upstream_detail(.code.as_ref(), .message.as_deref()))]
    InvalidStopId {
        /// The stop id as entered
        stop_id: String,
        /// Upstream error code, if reported
        code: Option<i64>,
        /// Upstream error message, if reported
        message: Option<String>,
    },

    /// A refresh finished without any departure to summarize
    #[error("No departures for stop {stop_id} within the time window")]
    EmptyResult {
        /// The stop that was refreshed
        stop_id: StopId,
    },

    /// The stop is already monitored
    #[error("Stop {0} is already configured")]
    AlreadyConfigured(StopId),

    /// The first refresh of a newly added stop failed
    #[error("Stop {stop_id} is not ready: {source}")]
    NotReady {
        /// The stop being added
        stop_id: StopId,
        /// Why the first refresh failed
        #[source]
        source: Box<ApplicationError>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Whether the error came from operator input rather than the upstream
    pub const fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTimeframe(_)
                | Self::InvalidStopId { .. }
                | Self::AlreadyConfigured(_)
                | Self::Domain(_)
        )
    }
}

fn upstream_detail(code: Option<&i64>, message: Option<&str>) -> String {
    match (code, message) {
        (None, None) => String::new(),
        (Some(code), None) => format!(" (code {code})"),
        (None, Some(message)) => format!(" ({message})"),
        (Some(code), Some(message)) => format!(" (code {code}: {message})"),
    }
}

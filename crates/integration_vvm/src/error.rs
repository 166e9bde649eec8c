//! VVM integration error types

use thiserror::Error;

/// Errors that can occur while talking to the VVM backend
///
/// Transport problems (connection errors, non-200 answers) are not errors at
/// this layer; they surface as "no data" from [`crate::VvmAccessApi::fetch`].
#[derive(Debug, Error)]
pub enum VvmError {
    /// The HTTP client could not be set up
    #[error("Client initialization failed: {0}")]
    ClientInit(String),

    /// The response body was not the JSON shape the endpoint promises
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The request could not be built from the given input
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<serde_json::Error> for VvmError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

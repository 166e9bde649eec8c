//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Stop identifier is empty or otherwise unusable
    #[error("Invalid stop id: {0}")]
    InvalidStopId(String),

    /// Time window must be a positive number of minutes
    #[error("Invalid time frame: cannot be <= 0 (got {0})")]
    InvalidTimeframe(i64),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

//! Stop identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Opaque identifier of a transit stop in the upstream timetable system
///
/// The identifier is only checked for being non-blank here; whether the
/// upstream system knows the stop is decided by querying it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopId {
    value: String,
}

impl StopId {
    /// Create a new stop identifier, trimming surrounding whitespace
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let raw = id.into();
        let value = raw.trim();

        if value.is_empty() {
            return Err(DomainError::InvalidStopId(raw));
        }

        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl AsRef<str> for StopId {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl TryFrom<String> for StopId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for StopId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StopId> for String {
    fn from(id: StopId) -> Self {
        id.value
    }
}

//! Stop search results and stop validation outcomes

use std::fmt;

use serde::{Deserialize, Serialize};

/// A stop returned by the stop finder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopMatch {
    /// Human-readable stop name
    pub name: String,
    /// Upstream identifier usable as a stop id
    pub id: String,
}

impl StopMatch {
    /// Create a new stop match
    #[must_use]
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for StopMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.id)
    }
}

/// Outcome of checking a stop identifier against the upstream system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StopValidation {
    /// The stop reported departures; `name` is the resolved display name
    Valid {
        /// Display name of the first reported stop point, if any
        name: Option<String>,
    },
    /// The upstream system rejected the stop
    Invalid {
        /// Upstream error code
        code: Option<i64>,
        /// Upstream error message
        message: Option<String>,
    },
    /// No usable answer (no data, or no explanation given)
    Unknown,
}

//! Destination filter applied to departure lists

use serde::{Deserialize, Serialize};

/// Case-insensitive destination filter
///
/// An empty filter matches every departure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DirectionFilter {
    needle: Option<String>,
}

impl DirectionFilter {
    /// Create a filter; blank input disables filtering
    pub fn new(direction: impl Into<String>) -> Self {
        let direction = direction.into();
        let trimmed = direction.trim();
        Self {
            needle: (!trimmed.is_empty()).then(|| trimmed.to_lowercase()),
        }
    }

    /// Whether a destination passes the filter
    pub fn matches(&self, destination: &str) -> bool {
        self.needle
            .as_deref()
            .is_none_or(|needle| destination.to_lowercase().contains(needle))
    }
}

impl From<String> for DirectionFilter {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for DirectionFilter {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<DirectionFilter> for String {
    fn from(filter: DirectionFilter) -> Self {
        filter.needle.unwrap_or_default()
    }
}

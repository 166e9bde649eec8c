//! A single upcoming departure from a stop

use std::fmt;

use serde::{Deserialize, Serialize};

/// One upcoming vehicle departure
///
/// Serialized with the short keys (`left`, `delay`, `type`, `num`, `to`,
/// `from`) that observers of the departure list consume.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Departure {
    /// Minutes until departure
    pub left: i64,
    /// Deviation from the timetable in minutes (negative = early)
    pub delay: i64,
    /// Vehicle type as reported upstream (e.g. "Bus", "Straßenbahn")
    #[serde(rename = "type")]
    pub kind: String,
    /// Line number
    #[serde(rename = "num")]
    pub line: String,
    /// Destination
    pub to: String,
    /// Origin
    pub from: String,
}

impl Departure {
    /// One-line summary in the form `(<left> min) <type> <num> (<to>)`
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "({} min) {} {} ({})",
            self.left, self.kind, self.line, self.to
        )
    }
}

impl fmt::Display for Departure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

//! Departure time window value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Exclusive upper bound, in minutes, on how far ahead a departure may be
///
/// A departure with `left < window` is considered upcoming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TimeWindow(u32);

impl TimeWindow {
    /// Window used by the setup form when the operator gives none
    pub const SETUP_DEFAULT_MINUTES: u32 = 15;

    /// Window used by the stop monitor when called without one
    pub const MONITOR_DEFAULT_MINUTES: u32 = 30;

    /// Create a time window from a signed number of minutes
    ///
    /// Values of zero or below are rejected.
    pub fn new(minutes: i64) -> Result<Self, DomainError> {
        if minutes <= 0 {
            return Err(DomainError::InvalidTimeframe(minutes));
        }

        u32::try_from(minutes)
            .map(Self)
            .map_err(|_| DomainError::ValidationError(format!("time frame too large: {minutes}")))
    }

    /// Window length in minutes
    pub const fn minutes(self) -> u32 {
        self.0
    }

    /// Whether a departure `left` minutes away falls inside the window
    pub fn contains(self, left: i64) -> bool {
        left < i64::from(self.0)
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self(Self::MONITOR_DEFAULT_MINUTES)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

impl TryFrom<i64> for TimeWindow {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TimeWindow> for i64 {
    fn from(window: TimeWindow) -> Self {
        Self::from(window.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_window_is_accepted() {
        let window = TimeWindow::new(15).unwrap();
        assert_eq!(window.minutes(), 15);
    }

    #[test]
    fn zero_window_is_rejected() {
        assert_eq!(TimeWindow::new(0), Err(DomainError::InvalidTimeframe(0)));
    }

    #[test]
    fn negative_window_is_rejected() {
        assert_eq!(TimeWindow::new(-1), Err(DomainError::InvalidTimeframe(-1)));
    }

    #[test]
    fn oversized_window_is_rejected() {
        assert!(matches!(
            TimeWindow::new(i64::MAX),
            Err(DomainError::ValidationError(_))
        ));
    }

    #[test]
    fn upper_bound_is_exclusive() {
        let window = TimeWindow::new(30).unwrap();
        assert!(window.contains(0));
        assert!(window.contains(29));
        assert!(!window.contains(30));
        assert!(!window.contains(31));
    }

    #[test]
    fn default_is_monitor_default() {
        assert_eq!(TimeWindow::default().minutes(), 30);
    }

    #[test]
    fn display_includes_unit() {
        assert_eq!(TimeWindow::new(5).unwrap().to_string(), "5 min");
    }
}

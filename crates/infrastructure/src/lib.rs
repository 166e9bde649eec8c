//! Infrastructure layer - Adapters for external systems
//!
//! Implements the departure port on top of the VVM client and owns
//! configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, LogFormat, PollingConfig, StopEntryConfig};
pub use telemetry::{TelemetryError, init_logging};

//! Application layer - Use cases and orchestration
//!
//! Owns the departure summary of each monitored stop, the setup validation
//! an operator goes through when adding a stop, the registry of monitored
//! stops and the sensor view observers read. Upstream access happens through
//! the [`ports::DeparturePort`] implemented in the infrastructure layer.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;

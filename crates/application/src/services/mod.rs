//! Application services - Use case implementations

mod departure_summary;
mod sensors;
mod stop_registry;
mod stop_setup;

pub use departure_summary::{DepartureSummary, MonitorSnapshot, NearestDeparture};
pub use sensors::{DOMAIN, DeviceInfo, SensorKind, SensorReading, SensorState, sensor_readings};
pub use stop_registry::{RegisteredStop, StopRegistry};
pub use stop_setup::{StopConfigInput, StopSetupService, ValidatedStop};

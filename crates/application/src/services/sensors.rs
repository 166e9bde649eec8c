//! Sensor view of a departure snapshot
//!
//! Every monitored stop is exposed as one device with three sensors: the
//! nearest departure as text, its minutes left and its delay.

use std::fmt;

use serde::Serialize;
use serde_json::{Value, json};

use super::departure_summary::MonitorSnapshot;

/// Prefix of every sensor unique id
pub const DOMAIN: &str = "vvm_public_transport";

const DEVICE_NAME: &str = "VVM Public Transport Stop";
const MANUFACTURER: &str = "VVM";

/// The sensors published per stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SensorKind {
    /// Text summary of the nearest departure
    NearestSummary,
    /// Minutes until the nearest departure
    NearestLeft,
    /// Delay of the nearest departure in minutes
    NearestDelay,
}

impl SensorKind {
    /// Every sensor, in publishing order
    pub const ALL: [Self; 3] = [Self::NearestSummary, Self::NearestLeft, Self::NearestDelay];

    /// Display name, also the last part of the unique id
    pub const fn name(self) -> &'static str {
        match self {
            Self::NearestSummary => "Nearest Summary",
            Self::NearestLeft => "Nearest Left",
            Self::NearestDelay => "Nearest Delay",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Native value of a sensor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SensorState {
    /// Free text
    Text(String),
    /// A duration in minutes
    Minutes(i64),
}

impl fmt::Display for SensorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Minutes(minutes) => write!(f, "{minutes}"),
        }
    }
}

/// The device a stop's sensors belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// Device model name
    pub name: &'static str,
    /// Device manufacturer
    pub manufacturer: &'static str,
    /// `(DOMAIN, stop_id)`
    pub identifier: (&'static str, String),
}

/// One sensor value as published to observers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReading {
    /// `<DOMAIN>_<stop_id>_<sensor name>`
    pub unique_id: String,
    /// Sensor name
    pub name: &'static str,
    /// Current value
    pub state: SensorState,
    /// Extra state, only on the summary sensor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Value>,
    /// Device the sensor belongs to
    pub device: DeviceInfo,
}

/// Project a snapshot onto the three sensors of its stop
pub fn sensor_readings(snapshot: &MonitorSnapshot) -> Vec<SensorReading> {
    let stop_id = snapshot.stop_id.as_str();
    let device = DeviceInfo {
        name: DEVICE_NAME,
        manufacturer: MANUFACTURER,
        identifier: (DOMAIN, stop_id.to_string()),
    };

    SensorKind::ALL
        .into_iter()
        .map(|kind| {
            let (state, attributes) = match kind {
                SensorKind::NearestSummary => (
                    SensorState::Text(snapshot.nearest.summary.clone()),
                    Some(json!({
                        "departures": snapshot.departures,
                        "last_updated": snapshot.last_updated,
                    })),
                ),
                SensorKind::NearestLeft => (SensorState::Minutes(snapshot.nearest.left), None),
                SensorKind::NearestDelay => (SensorState::Minutes(snapshot.nearest.delay), None),
            };
            SensorReading {
                unique_id: format!("{DOMAIN}_{stop_id}_{}", kind.name()),
                name: kind.name(),
                state,
                attributes,
                device: device.clone(),
            }
        })
        .collect()
}

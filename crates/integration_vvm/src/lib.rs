//! VVM public transport integration
//!
//! Talks to the EFA-based departure monitor of the VVM mobile backend
//! (`https://mobile.defas-fgi.de/vvmapp`). Two endpoints are used:
//!
//! - `XML_STOPFINDER_REQUEST` to search stops by keyword
//! - `XML_DM_REQUEST` to fetch real-time departures for one stop
//!
//! # Architecture
//!
//! [`VvmAccessApi`] issues single GET requests and decodes their JSON bodies,
//! treating any non-200 answer as "no data". [`StopMonitor`] builds the
//! departure-monitor query on top of it, validates stop ids and turns raw
//! departure entries into [`domain::Departure`] records. Callers that only
//! need the behavior depend on the [`DepartureClient`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::{StopId, TimeWindow};
//! use integration_vvm::{DepartureClient, StopMonitor, VvmConfig};
//!
//! let monitor = StopMonitor::new(&VvmConfig::default())?;
//! let stop = StopId::new("de:09663:177")?;
//! let departures = monitor.get_departures(&stop, TimeWindow::new(15)?).await?;
//! ```

mod client;
mod config;
mod error;
mod models;
mod monitor;

pub use client::{DEPARTURE_MONITOR_ENDPOINT, STOP_FINDER_ENDPOINT, VvmAccessApi};
pub use config::VvmConfig;
pub use error::VvmError;
pub use models::{
    DmBlock, DmMessage, DmPoint, DmResponse, RawDeparture, RawServingLine, RawStopPoint,
    StopFinderBlock, StopFinderResponse,
};
pub use monitor::{DepartureClient, StopMonitor};

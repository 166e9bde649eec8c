//! Entities - Departure and stop records produced by the upstream monitor

mod departure;
mod stop;

pub use departure::Departure;
pub use stop::{StopMatch, StopValidation};

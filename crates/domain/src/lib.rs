//! Domain layer for the VVM departure monitor
//!
//! Contains the departure and stop model, value objects and domain errors.
//! This layer performs no I/O and defines the ubiquitous language shared by
//! the integration, application and presentation crates.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;

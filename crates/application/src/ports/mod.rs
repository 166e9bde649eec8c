//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod departure_port;

#[cfg(test)]
pub use departure_port::MockDeparturePort;
pub use departure_port::DeparturePort;

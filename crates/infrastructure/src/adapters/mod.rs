//! Adapters implementing application ports

mod vvm_adapter;

pub use vvm_adapter::VvmDepartureAdapter;

//! Value Objects - Immutable, identity-less domain primitives

mod direction_filter;
mod stop_id;
mod time_window;

pub use direction_filter::DirectionFilter;
pub use stop_id::StopId;
pub use time_window::TimeWindow;

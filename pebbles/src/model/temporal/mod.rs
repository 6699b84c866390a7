mod service_time;
mod temporal_error;
mod time_tracker;

pub use service_time::{ServiceTime, MAX_SERVICE_SECONDS};
pub use temporal_error::TemporalError;
pub use time_tracker::TimeTracker;

mod entry_point;
mod interchange;
mod rider;
mod rider_factory;
mod schedule_index;
mod schedule_reader;
mod transit_network;
mod traversal_error;
mod trip;

pub use entry_point::EntryPoint;
pub use interchange::{InterchangeStop, NetworkInterchange};
pub use rider::{Rider, RiderPosition, RiderStatus};
pub use rider_factory::RiderFactory;
pub use schedule_index::ScheduleIndex;
pub use schedule_reader::ScheduleReader;
pub use transit_network::TransitNetwork;
pub use traversal_error::TraversalError;
pub use trip::{Trip, TripVisit};

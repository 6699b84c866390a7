use std::sync::Arc;

use super::entry_point::EntryPoint;
use super::rider::Rider;
use super::schedule_reader::ScheduleReader;
use super::transit_network::TransitNetwork;
use super::traversal_error::TraversalError;
use crate::model::temporal::{ServiceTime, TimeTracker};
use crate::model::Path;

/// binds a search direction to a transit network and hands out matching
/// riders and schedule readers. the factory is the unit of search
/// configuration: swapping the network for a route-removal run rebuilds
/// the whole (network, direction, rider) arrangement at once.
#[derive(Clone)]
pub struct RiderFactory {
    network: Arc<dyn TransitNetwork>,
    tracker: TimeTracker,
}

impl RiderFactory {
    pub fn new(network: Arc<dyn TransitNetwork>, tracker: TimeTracker) -> RiderFactory {
        RiderFactory { network, tracker }
    }

    pub fn tracker(&self) -> TimeTracker {
        self.tracker
    }

    pub fn schedule_reader(&self) -> ScheduleReader {
        ScheduleReader::new(self.network.clone(), self.tracker)
    }

    /// boards a rider at `entry`, continuing the path that reached the
    /// boarding stop.
    pub fn rider(
        &self,
        entry: &EntryPoint,
        path_to_stop: Path,
        cutoff: &ServiceTime,
    ) -> Result<Rider, TraversalError> {
        let trip = self
            .network
            .trip(&entry.trip_id)
            .ok_or_else(|| TraversalError::UnknownTrip(entry.trip_id.clone()))?;
        Rider::new(self.tracker, trip, entry, path_to_stop, *cutoff)
    }

    /// the same direction bound to a substituted network; this factory is
    /// left untouched.
    pub fn with_network(&self, network: Arc<dyn TransitNetwork>) -> RiderFactory {
        RiderFactory {
            network,
            tracker: self.tracker,
        }
    }
}

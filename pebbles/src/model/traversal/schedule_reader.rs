use std::sync::Arc;

use super::entry_point::EntryPoint;
use super::transit_network::TransitNetwork;
use super::traversal_error::TraversalError;
use crate::model::temporal::{ServiceTime, TimeTracker};

/// direction-aware window lookup over a transit network. callers pass the
/// current time and the cutoff in search order; the reader orients the
/// window so they never branch on direction.
pub struct ScheduleReader {
    network: Arc<dyn TransitNetwork>,
    tracker: TimeTracker,
}

impl ScheduleReader {
    pub(crate) fn new(network: Arc<dyn TransitNetwork>, tracker: TimeTracker) -> ScheduleReader {
        ScheduleReader { network, tracker }
    }

    /// boardable entry points at `stop` between the current time and the
    /// cutoff, both inclusive, ascending by time. a window whose cutoff
    /// lies behind the current time in the direction of travel is empty.
    pub fn entry_points(
        &self,
        stop: &str,
        current: &ServiceTime,
        cutoff: &ServiceTime,
    ) -> Result<Vec<EntryPoint>, TraversalError> {
        let (from, to) = match self.tracker {
            TimeTracker::Forward => (*current, *cutoff),
            TimeTracker::Backward => (*cutoff, *current),
        };
        if from > to {
            return Ok(vec![]);
        }
        self.network.entry_points(stop, &from, &to)
    }
}

use std::sync::Arc;

use uom::si::f64::Time;

use crate::model::temporal::{ServiceTime, TemporalError, TimeTracker};
use crate::model::Location;

/// one unit of scoring work: a center and its time window. `start` is the
/// time at the center when the traversal clock begins; the cutoff lies
/// after it when searching forward and before it when searching
/// retrospectively.
#[derive(Clone, Debug)]
pub struct SearchTask {
    center: Arc<Location>,
    start: ServiceTime,
    cutoff: ServiceTime,
}

impl SearchTask {
    pub fn new(center: Arc<Location>, start: ServiceTime, cutoff: ServiceTime) -> SearchTask {
        SearchTask {
            center,
            start,
            cutoff,
        }
    }

    /// builds the task from a time budget, placing the cutoff on the far
    /// side of `start` in the tracker's direction.
    pub fn from_budget(
        center: Arc<Location>,
        start: ServiceTime,
        budget: Time,
        tracker: TimeTracker,
    ) -> Result<SearchTask, TemporalError> {
        let cutoff = tracker.adjust(&start, budget)?;
        Ok(SearchTask {
            center,
            start,
            cutoff,
        })
    }

    pub fn center(&self) -> &Arc<Location> {
        &self.center
    }

    pub fn start(&self) -> ServiceTime {
        self.start
    }

    pub fn cutoff(&self) -> ServiceTime {
        self.cutoff
    }

    /// stable task label for logs and score rows.
    pub fn label(&self) -> String {
        format!("{}@{}", self.center.id(), self.start)
    }
}

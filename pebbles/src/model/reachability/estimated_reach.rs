use std::sync::Arc;

use uom::si::f64::Length;

use crate::model::Location;

/// one candidate produced by a distance estimator: a location together with
/// the straight-line distance from the query origin. straight-line distance
/// underestimates true walking distance, so a candidate set drawn at a
/// budget-equivalent radius is a superset of the truly reachable set.
#[derive(Clone, Debug)]
pub struct EstimatedReach {
    location: Arc<Location>,
    distance: Length,
}

impl EstimatedReach {
    pub fn new(location: Arc<Location>, distance: Length) -> EstimatedReach {
        EstimatedReach { location, distance }
    }

    pub fn location(&self) -> &Arc<Location> {
        &self.location
    }

    pub fn distance(&self) -> Length {
        self.distance
    }
}

use uom::si::f64::Length;

use super::{EstimatedReach, ReachabilityError};
use crate::model::Location;

/// cheap candidate generator over precomputed straight-line distances.
/// implementations answer from stored data and never measure geometry at
/// query time.
pub trait DistanceEstimator: Send + Sync {
    /// every known location within `distance` of `origin`, by straight-line
    /// measure. requesting a distance beyond the implementation's
    /// precomputed maximum is a configuration error, not a miss.
    fn reachable_locations(
        &self,
        origin: &Location,
        distance: Length,
    ) -> Result<Vec<EstimatedReach>, ReachabilityError>;
}

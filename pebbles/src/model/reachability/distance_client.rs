use std::collections::HashMap;

use uom::si::f64::Time;

use super::{EstimatedReach, ReachabilityError, WalkingCost};
use crate::model::Location;

/// exact walking-cost resolver, possibly backed by a remote directions
/// service. synchronous; callers decide whether a failure is worth a retry.
pub trait DistanceClient: Send + Sync {
    /// resolves exact walking costs from `origin` to each candidate, keyed
    /// by destination location id. candidates past `budget` may be returned
    /// at their true cost or omitted, at the implementation's discretion.
    fn walking_costs(
        &self,
        origin: &Location,
        candidates: &[EstimatedReach],
        budget: Time,
    ) -> Result<HashMap<String, WalkingCost>, ReachabilityError>;
}

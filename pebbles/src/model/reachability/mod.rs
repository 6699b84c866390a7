mod distance_client;
mod distance_estimator;
mod estimated_reach;
mod reachability_client;
mod reachability_error;
mod stored_distance_estimator;
mod walking_cost;

pub use distance_client::DistanceClient;
pub use distance_estimator::DistanceEstimator;
pub use estimated_reach::EstimatedReach;
pub use reachability_client::ReachabilityClient;
pub use reachability_error::ReachabilityError;
pub use stored_distance_estimator::StoredDistanceEstimator;
pub use walking_cost::WalkingCost;

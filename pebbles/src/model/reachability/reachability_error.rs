use crate::model::key::KeyError;
use crate::model::store::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum ReachabilityError {
    #[error("requested distance {requested_meters}m exceeds the precomputed maximum of {max_meters}m; raise the estimator maximum and re-run the precompute")]
    DistanceBeyondMaximum {
        requested_meters: u32,
        max_meters: u32,
    },
    #[error("origin '{0}' is not in the location table")]
    UnknownOrigin(String),
    #[error("walking speed must be strictly positive, found {0} m/s")]
    InvalidWalkingSpeed(f64),
    #[error("failure encoding walking cost row for origin '{origin_id}': {message}")]
    CostRowEncoding { origin_id: String, message: String },
    #[error("malformed walking cost row under key '{key}': {message}")]
    MalformedCostRow { key: String, message: String },
    #[error("malformed distance row under key '{key}': {message}")]
    MalformedDistanceRow { key: String, message: String },
    #[error("malformed cached-duration marker for origin '{origin_id}': {value}")]
    MalformedMarker { origin_id: String, value: String },
    #[error("exact distance client failed for origin '{origin_id}': {message}")]
    DistanceClientFailure { origin_id: String, message: String },
    #[error(transparent)]
    InvalidKey(#[from] KeyError),
    #[error(transparent)]
    StoreFailure(#[from] StoreError),
}

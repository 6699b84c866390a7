use crate::model::reachability::ReachabilityError;
use crate::model::temporal::{ServiceTime, TemporalError};
use crate::model::traversal::TraversalError;

#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    #[error("search window from {start} to {cutoff} is inverted for the configured direction")]
    InvalidWindow {
        start: ServiceTime,
        cutoff: ServiceTime,
    },
    #[error("location '{0}' reached by the search is not in the location table")]
    UnknownLocation(String),
    #[error(transparent)]
    Traversal(#[from] TraversalError),
    #[error(transparent)]
    Reachability(#[from] ReachabilityError),
    #[error(transparent)]
    InvalidTime(#[from] TemporalError),
}

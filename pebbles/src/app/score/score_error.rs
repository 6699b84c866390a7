use crate::model::grid::GridError;
use crate::model::key::KeyError;
use crate::model::reachability::ReachabilityError;
use crate::model::store::StoreError;
use crate::model::temporal::TemporalError;
use crate::model::traversal::TraversalError;

#[derive(thiserror::Error, Debug)]
pub enum ScoreError {
    #[error("failure reading score configuration '{path}': {message}")]
    ConfigRead { path: String, message: String },
    #[error("invalid score configuration: {0}")]
    InvalidConfig(String),
    #[error("failure building the scoring worker pool: {0}")]
    WorkerPool(String),
    #[error("failure building a progress bar: {0}")]
    Progress(String),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    InvalidId(#[from] KeyError),
    #[error(transparent)]
    Temporal(#[from] TemporalError),
    #[error(transparent)]
    Traversal(#[from] TraversalError),
    #[error(transparent)]
    Reachability(#[from] ReachabilityError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

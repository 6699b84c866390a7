use crate::model::key::KeyError;
use crate::model::store::StoreError;
use crate::model::temporal::TemporalError;

#[derive(thiserror::Error, Debug)]
pub enum TraversalError {
    #[error("continue_trip called on an exhausted rider (trip '{trip_id}' at stop '{stop_id}')")]
    RiderExhausted { trip_id: String, stop_id: String },
    #[error("duplicate trip id '{0}' in schedule")]
    DuplicateTrip(String),
    #[error("trip '{0}' has no scheduled visits")]
    EmptyTrip(String),
    #[error("unknown trip '{0}'")]
    UnknownTrip(String),
    #[error("entry point for trip '{trip_id}' at stop '{stop_id}' sequence {sequence} does not match the trip's visit schedule")]
    InconsistentEntryPoint {
        trip_id: String,
        stop_id: String,
        sequence: usize,
    },
    #[error("failure encoding entry point row for trip '{trip_id}': {message}")]
    EntryPointEncoding { trip_id: String, message: String },
    #[error("malformed entry point row under key '{key}': {message}")]
    MalformedEntryPoint { key: String, message: String },
    #[error("failure reading network interchange '{path}': {message}")]
    InterchangeRead { path: String, message: String },
    #[error(transparent)]
    InvalidKey(#[from] KeyError),
    #[error(transparent)]
    InvalidTime(#[from] TemporalError),
    #[error(transparent)]
    StoreFailure(#[from] StoreError),
}

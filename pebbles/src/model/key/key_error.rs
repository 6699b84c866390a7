use crate::model::temporal::TemporalError;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum KeyError {
    #[error("invalid {field} '{value}': {reason}")]
    InvalidIdField {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("{field} value {value} exceeds the declared domain maximum of {max}")]
    OutOfDomain {
        field: &'static str,
        value: u64,
        max: u64,
    },
    #[error("unable to materialize {key_type} from encoded key '{encoded}': {reason}")]
    Unmaterializable {
        key_type: &'static str,
        encoded: String,
        reason: String,
    },
    #[error("duplicate location id '{0}'; ids are cache key material and must be unique within a run")]
    DuplicateId(String),
    #[error(transparent)]
    InvalidTime(#[from] TemporalError),
}

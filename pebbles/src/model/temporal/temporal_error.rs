#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TemporalError {
    #[error("invalid service time {component} value {value}, must be in [0, {max}]")]
    InvalidComponent {
        component: &'static str,
        value: u32,
        max: u32,
    },
    #[error("unable to parse service time from '{0}', expected zero-padded HH:MM:SS")]
    UnparseableServiceTime(String),
    #[error("service time of {0} seconds falls outside the service day [00:00:00, 47:59:59]")]
    OutsideServiceDay(i64),
    #[error("negative duration of {0} seconds used in service time arithmetic")]
    NegativeDuration(f64),
}

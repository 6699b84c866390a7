use std::str::FromStr;

use super::ranged_key::{RangedKey, SENTINEL, SEPARATOR, UNIQUIFIER_LEN};
use super::{key_ops, KeyError};
use crate::model::temporal::ServiceTime;

/// orders schedule entry points by stop and time of day:
/// `stop|HH:MM:SS|uuuuuuuu`.
///
/// the random uniquifier disambiguates multiple boardable trips sharing a
/// stop and second; it is the final tiebreak field and carries no other
/// meaning. the zero-padded service time keeps encoded-string order equal
/// to time order within a stop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StopTimeKey {
    stop_id: String,
    time: ServiceTime,
    uniquifier: String,
}

impl StopTimeKey {
    pub fn new(stop_id: &str, time: &ServiceTime) -> Result<StopTimeKey, KeyError> {
        key_ops::validate_id("stop id", stop_id)?;
        Ok(StopTimeKey {
            stop_id: stop_id.to_string(),
            time: *time,
            uniquifier: key_ops::uniquifier(),
        })
    }

    pub fn stop_id(&self) -> &str {
        &self.stop_id
    }

    pub fn time(&self) -> &ServiceTime {
        &self.time
    }

    /// lower scan bound for entry points at `stop_id` from `time` onward.
    pub fn window_min(stop_id: &str, time: &ServiceTime) -> Result<StopTimeKey, KeyError> {
        key_ops::validate_id("stop id", stop_id)?;
        Ok(StopTimeKey {
            stop_id: stop_id.to_string(),
            time: *time,
            uniquifier: "0".repeat(UNIQUIFIER_LEN),
        })
    }

    /// upper scan bound for entry points at `stop_id` up to and including
    /// `time`.
    pub fn window_max(stop_id: &str, time: &ServiceTime) -> Result<StopTimeKey, KeyError> {
        key_ops::validate_id("stop id", stop_id)?;
        Ok(StopTimeKey {
            stop_id: stop_id.to_string(),
            time: *time,
            uniquifier: SENTINEL.to_string().repeat(UNIQUIFIER_LEN),
        })
    }
}

impl RangedKey for StopTimeKey {
    fn encode(&self) -> String {
        format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.stop_id, self.time, self.uniquifier
        )
    }

    fn decode(encoded: &str) -> Result<StopTimeKey, KeyError> {
        let fail = |reason: String| KeyError::Unmaterializable {
            key_type: "StopTimeKey",
            encoded: encoded.to_string(),
            reason,
        };
        let parts: Vec<&str> = encoded.split(SEPARATOR).collect();
        let [stop_id, time_str, uniquifier] = parts.as_slice() else {
            return Err(fail("expected three separated fields".to_string()));
        };
        key_ops::validate_id("stop id", stop_id).map_err(|e| fail(e.to_string()))?;
        let time = ServiceTime::from_str(time_str).map_err(|e| fail(e.to_string()))?;
        key_ops::validate_uniquifier(uniquifier).map_err(|e| fail(e.to_string()))?;
        Ok(StopTimeKey {
            stop_id: stop_id.to_string(),
            time,
            uniquifier: uniquifier.to_string(),
        })
    }

    fn range_min(&self) -> StopTimeKey {
        StopTimeKey {
            stop_id: self.stop_id.clone(),
            time: ServiceTime::MIN,
            uniquifier: "0".repeat(UNIQUIFIER_LEN),
        }
    }

    fn range_max(&self) -> StopTimeKey {
        StopTimeKey {
            stop_id: self.stop_id.clone(),
            time: ServiceTime::MAX,
            uniquifier: SENTINEL.to_string().repeat(UNIQUIFIER_LEN),
        }
    }
}

use super::ranged_key::{RangedKey, ID_MIN, SENTINEL, SEPARATOR};
use super::{key_ops, KeyError};

/// one full day of walking, the declared domain maximum for cached elapsed
/// seconds.
pub const MAX_ELAPSED_SECONDS: u32 = 86_400;

const ELAPSED_WIDTH: usize = 5;

/// walking-cost cache rows keyed by origin and elapsed walking seconds:
/// `origin|SSSSS|destination`.
///
/// one row exists per (origin, destination) pair, stored at the elapsed
/// seconds actually measured. the destination id is the trailing tiebreak
/// field, which keeps keys unique without a random suffix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElapsedTimeKey {
    origin_id: String,
    elapsed_seconds: u32,
    destination_id: String,
}

impl ElapsedTimeKey {
    pub fn new(
        origin_id: &str,
        elapsed_seconds: u32,
        destination_id: &str,
    ) -> Result<ElapsedTimeKey, KeyError> {
        key_ops::validate_id("origin id", origin_id)?;
        key_ops::validate_id("destination id", destination_id)?;
        if elapsed_seconds > MAX_ELAPSED_SECONDS {
            return Err(KeyError::OutOfDomain {
                field: "elapsed seconds",
                value: elapsed_seconds as u64,
                max: MAX_ELAPSED_SECONDS as u64,
            });
        }
        Ok(ElapsedTimeKey {
            origin_id: origin_id.to_string(),
            elapsed_seconds,
            destination_id: destination_id.to_string(),
        })
    }

    pub fn origin_id(&self) -> &str {
        &self.origin_id
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn destination_id(&self) -> &str {
        &self.destination_id
    }

    /// lower scan bound for rows from `origin_id` at `elapsed_seconds` or
    /// more.
    pub fn window_min(origin_id: &str, elapsed_seconds: u32) -> Result<ElapsedTimeKey, KeyError> {
        Self::bound(origin_id, elapsed_seconds, ID_MIN)
    }

    /// upper scan bound for rows from `origin_id` up to and including
    /// `elapsed_seconds`.
    pub fn window_max(origin_id: &str, elapsed_seconds: u32) -> Result<ElapsedTimeKey, KeyError> {
        Self::bound(origin_id, elapsed_seconds, SENTINEL)
    }

    fn bound(
        origin_id: &str,
        elapsed_seconds: u32,
        destination_fill: char,
    ) -> Result<ElapsedTimeKey, KeyError> {
        key_ops::validate_id("origin id", origin_id)?;
        if elapsed_seconds > MAX_ELAPSED_SECONDS {
            return Err(KeyError::OutOfDomain {
                field: "elapsed seconds",
                value: elapsed_seconds as u64,
                max: MAX_ELAPSED_SECONDS as u64,
            });
        }
        Ok(ElapsedTimeKey {
            origin_id: origin_id.to_string(),
            elapsed_seconds,
            destination_id: destination_fill.to_string(),
        })
    }
}

impl RangedKey for ElapsedTimeKey {
    fn encode(&self) -> String {
        // five digits cover the 86_400 domain maximum
        format!(
            "{}{SEPARATOR}{:05}{SEPARATOR}{}",
            self.origin_id, self.elapsed_seconds, self.destination_id
        )
    }

    fn decode(encoded: &str) -> Result<ElapsedTimeKey, KeyError> {
        let fail = |reason: String| KeyError::Unmaterializable {
            key_type: "ElapsedTimeKey",
            encoded: encoded.to_string(),
            reason,
        };
        let parts: Vec<&str> = encoded.split(SEPARATOR).collect();
        let [origin_id, elapsed_str, destination_id] = parts.as_slice() else {
            return Err(fail("expected three separated fields".to_string()));
        };
        key_ops::validate_id("origin id", origin_id).map_err(|e| fail(e.to_string()))?;
        let elapsed_seconds = key_ops::parse_fixed_width(
            "elapsed seconds",
            elapsed_str,
            ELAPSED_WIDTH,
            MAX_ELAPSED_SECONDS,
        )
        .map_err(|e| fail(e.to_string()))?;
        key_ops::validate_id("destination id", destination_id).map_err(|e| fail(e.to_string()))?;
        Ok(ElapsedTimeKey {
            origin_id: origin_id.to_string(),
            elapsed_seconds,
            destination_id: destination_id.to_string(),
        })
    }

    fn range_min(&self) -> ElapsedTimeKey {
        ElapsedTimeKey {
            origin_id: self.origin_id.clone(),
            elapsed_seconds: 0,
            destination_id: ID_MIN.to_string(),
        }
    }

    fn range_max(&self) -> ElapsedTimeKey {
        ElapsedTimeKey {
            origin_id: self.origin_id.clone(),
            elapsed_seconds: MAX_ELAPSED_SECONDS,
            destination_id: SENTINEL.to_string(),
        }
    }
}

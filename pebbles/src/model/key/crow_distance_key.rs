use super::ranged_key::{RangedKey, SENTINEL, SEPARATOR, UNIQUIFIER_LEN};
use super::{key_ops, KeyError};

/// roughly the antipodal distance of the earth in meters, the declared
/// domain maximum for stored straight-line distances.
pub const MAX_DISTANCE_METERS: u32 = 20_000_000;

const DISTANCE_WIDTH: usize = 8;

/// precomputed straight-line distance rows: `origin|MMMMMMMM|uuuuuuuu`.
///
/// meters are zero-padded to the antipodal maximum so encoded-string order
/// equals distance order within an origin. the random uniquifier keeps
/// rows unique when several destinations sit at the same whole-meter
/// distance; it is the final tiebreak field only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrowDistanceKey {
    origin_id: String,
    distance_meters: u32,
    uniquifier: String,
}

impl CrowDistanceKey {
    pub fn new(origin_id: &str, distance_meters: u32) -> Result<CrowDistanceKey, KeyError> {
        key_ops::validate_id("origin id", origin_id)?;
        if distance_meters > MAX_DISTANCE_METERS {
            return Err(KeyError::OutOfDomain {
                field: "distance meters",
                value: distance_meters as u64,
                max: MAX_DISTANCE_METERS as u64,
            });
        }
        Ok(CrowDistanceKey {
            origin_id: origin_id.to_string(),
            distance_meters,
            uniquifier: key_ops::uniquifier(),
        })
    }

    pub fn origin_id(&self) -> &str {
        &self.origin_id
    }

    pub fn distance_meters(&self) -> u32 {
        self.distance_meters
    }

    /// upper scan bound for rows from `origin_id` out to and including
    /// `distance_meters`.
    pub fn window_max(origin_id: &str, distance_meters: u32) -> Result<CrowDistanceKey, KeyError> {
        key_ops::validate_id("origin id", origin_id)?;
        if distance_meters > MAX_DISTANCE_METERS {
            return Err(KeyError::OutOfDomain {
                field: "distance meters",
                value: distance_meters as u64,
                max: MAX_DISTANCE_METERS as u64,
            });
        }
        Ok(CrowDistanceKey {
            origin_id: origin_id.to_string(),
            distance_meters,
            uniquifier: SENTINEL.to_string().repeat(UNIQUIFIER_LEN),
        })
    }
}

impl RangedKey for CrowDistanceKey {
    fn encode(&self) -> String {
        // eight digits cover the 20_000_000 domain maximum
        format!(
            "{}{SEPARATOR}{:08}{SEPARATOR}{}",
            self.origin_id, self.distance_meters, self.uniquifier
        )
    }

    fn decode(encoded: &str) -> Result<CrowDistanceKey, KeyError> {
        let fail = |reason: String| KeyError::Unmaterializable {
            key_type: "CrowDistanceKey",
            encoded: encoded.to_string(),
            reason,
        };
        let parts: Vec<&str> = encoded.split(SEPARATOR).collect();
        let [origin_id, distance_str, uniquifier] = parts.as_slice() else {
            return Err(fail("expected three separated fields".to_string()));
        };
        key_ops::validate_id("origin id", origin_id).map_err(|e| fail(e.to_string()))?;
        let distance_meters = key_ops::parse_fixed_width(
            "distance meters",
            distance_str,
            DISTANCE_WIDTH,
            MAX_DISTANCE_METERS,
        )
        .map_err(|e| fail(e.to_string()))?;
        key_ops::validate_uniquifier(uniquifier).map_err(|e| fail(e.to_string()))?;
        Ok(CrowDistanceKey {
            origin_id: origin_id.to_string(),
            distance_meters,
            uniquifier: uniquifier.to_string(),
        })
    }

    fn range_min(&self) -> CrowDistanceKey {
        CrowDistanceKey {
            origin_id: self.origin_id.clone(),
            distance_meters: 0,
            uniquifier: "0".repeat(UNIQUIFIER_LEN),
        }
    }

    fn range_max(&self) -> CrowDistanceKey {
        CrowDistanceKey {
            origin_id: self.origin_id.clone(),
            distance_meters: MAX_DISTANCE_METERS,
            uniquifier: SENTINEL.to_string().repeat(UNIQUIFIER_LEN),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{CrowDistanceKey, MAX_DISTANCE_METERS};
    use crate::model::key::{KeyError, RangedKey};

    #[test]
    fn test_round_trip_at_domain_boundaries() {
        for meters in [0, 1, 1_500, MAX_DISTANCE_METERS] {
            let key = CrowDistanceKey::new("origin", meters).expect("test invariant failed");
            let decoded = CrowDistanceKey::decode(&key.encode()).expect("test invariant failed");
            assert_eq!(decoded, key);
        }
    }

    #[test]
    fn test_out_of_domain_rejected_at_construction() {
        assert!(matches!(
            CrowDistanceKey::new("origin", MAX_DISTANCE_METERS + 1),
            Err(KeyError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn test_range_bounds_bracket_key() {
        let key = CrowDistanceKey::new("origin", 800).expect("test invariant failed");
        assert!(key.range_min().encode() <= key.encode());
        assert!(key.encode() <= key.range_max().encode());
    }

    #[test]
    fn test_window_scan_is_distance_bounded() {
        let min = CrowDistanceKey::new("o", 0)
            .expect("test invariant failed")
            .range_min();
        let max = CrowDistanceKey::window_max("o", 500).expect("test invariant failed");
        let near = CrowDistanceKey::new("o", 500).expect("test invariant failed");
        let far = CrowDistanceKey::new("o", 501).expect("test invariant failed");
        assert!(min.encode() <= near.encode() && near.encode() <= max.encode());
        assert!(far.encode() > max.encode());
    }
}

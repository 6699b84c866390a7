use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uom::si::f64::{Length, Time, Velocity};

/// the cost of walking from an origin to one destination: elapsed duration
/// plus ground distance. serialized as a `{seconds, meters}` row for cache
/// persistence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkingCost {
    duration: Time,
    distance: Length,
}

#[derive(Serialize, Deserialize)]
struct CostRow {
    seconds: f64,
    meters: f64,
}

impl WalkingCost {
    pub fn new(duration: Time, distance: Length) -> WalkingCost {
        WalkingCost { duration, distance }
    }

    /// derives the duration from a distance at a constant walking speed.
    /// used in estimate short-circuit mode, where no exact client refines
    /// the estimator's straight-line distances.
    pub fn from_distance_at(distance: Length, speed: Velocity) -> WalkingCost {
        WalkingCost {
            duration: distance / speed,
            distance,
        }
    }

    pub fn duration(&self) -> Time {
        self.duration
    }

    pub fn distance(&self) -> Length {
        self.distance
    }

    /// whole-second cache position for this cost, rounded up so a row is
    /// never returned under a budget its true duration exceeds.
    pub fn elapsed_seconds(&self) -> u32 {
        self.duration.get::<uom::si::time::second>().ceil() as u32
    }
}

impl Serialize for WalkingCost {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        CostRow {
            seconds: self.duration.get::<uom::si::time::second>(),
            meters: self.distance.get::<uom::si::length::meter>(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WalkingCost {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let row = CostRow::deserialize(deserializer)?;
        for field in [row.seconds, row.meters] {
            if !field.is_finite() || field < 0.0 {
                return Err(D::Error::custom(format!(
                    "walking cost must be non-negative and finite, found {}s / {}m",
                    row.seconds, row.meters
                )));
            }
        }
        Ok(WalkingCost {
            duration: Time::new::<uom::si::time::second>(row.seconds),
            distance: Length::new::<uom::si::length::meter>(row.meters),
        })
    }
}

#[cfg(test)]
mod test {
    use uom::si::f64::{Length, Time, Velocity};
    use uom::si::length::meter;
    use uom::si::time::second;
    use uom::si::velocity::meter_per_second;

    use super::WalkingCost;

    #[test]
    fn test_serde_round_trip() {
        let cost = WalkingCost::new(
            Time::new::<second>(372.5),
            Length::new::<meter>(517.25),
        );
        let encoded = serde_json::to_value(cost).expect("test invariant failed");
        let decoded: WalkingCost =
            serde_json::from_value(encoded).expect("test invariant failed");
        assert_eq!(decoded, cost);
    }

    #[test]
    fn test_estimate_mode_derives_duration_from_speed() {
        let speed = Velocity::new::<meter_per_second>(1.25);
        let cost = WalkingCost::from_distance_at(Length::new::<meter>(500.0), speed);
        assert_eq!(cost.duration().get::<second>(), 400.0);
        assert_eq!(cost.distance().get::<meter>(), 500.0);
    }

    #[test]
    fn test_elapsed_seconds_rounds_up() {
        let cost = WalkingCost::new(Time::new::<second>(600.2), Length::new::<meter>(800.0));
        assert_eq!(cost.elapsed_seconds(), 601);
        let exact = WalkingCost::new(Time::new::<second>(600.0), Length::new::<meter>(800.0));
        assert_eq!(exact.elapsed_seconds(), 600);
    }

    #[test]
    fn test_deserialize_rejects_negative_and_non_finite() {
        for bad in [
            r#"{"seconds": -1.0, "meters": 10.0}"#,
            r#"{"seconds": 10.0, "meters": -1.0}"#,
            r#"{"seconds": null, "meters": 10.0}"#,
        ] {
            assert!(
                serde_json::from_str::<WalkingCost>(bad).is_err(),
                "expected decode failure for '{bad}'"
            );
        }
    }
}

use std::fmt::Display;
use std::str::FromStr;

use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};
use uom::si::f64::Time;

use super::TemporalError;

/// last representable second of a service day, 47:59:59. hours 24 and above
/// express trips which continue past midnight but logically belong to the
/// same service day (>> 24 hours).
pub const MAX_SERVICE_SECONDS: u32 = 48 * 3600 - 1;

const MAX_HOUR: u32 = 47;

/// wall-clock time of day on a single service day, with second granularity.
/// stored as total seconds since 00:00:00 so that the derived ordering
/// matches the (hour, minute, second) lexicographic ordering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceTime(u32);

impl ServiceTime {
    /// first second of the service day, 00:00:00.
    pub const MIN: ServiceTime = ServiceTime(0);
    /// last second of the service day, 47:59:59.
    pub const MAX: ServiceTime = ServiceTime(MAX_SERVICE_SECONDS);

    pub fn new(hour: u32, minute: u32, second: u32) -> Result<ServiceTime, TemporalError> {
        if hour > MAX_HOUR {
            return Err(TemporalError::InvalidComponent {
                component: "hour",
                value: hour,
                max: MAX_HOUR,
            });
        }
        if minute > 59 {
            return Err(TemporalError::InvalidComponent {
                component: "minute",
                value: minute,
                max: 59,
            });
        }
        if second > 59 {
            return Err(TemporalError::InvalidComponent {
                component: "second",
                value: second,
                max: 59,
            });
        }
        Ok(ServiceTime(hour * 3600 + minute * 60 + second))
    }

    pub fn from_total_seconds(seconds: u32) -> Result<ServiceTime, TemporalError> {
        if seconds > MAX_SERVICE_SECONDS {
            return Err(TemporalError::OutsideServiceDay(seconds as i64));
        }
        Ok(ServiceTime(seconds))
    }

    pub fn hour(&self) -> u32 {
        self.0 / 3600
    }

    pub fn minute(&self) -> u32 {
        (self.0 % 3600) / 60
    }

    pub fn second(&self) -> u32 {
        self.0 % 60
    }

    pub fn total_seconds(&self) -> u32 {
        self.0
    }

    /// advances this time by a non-negative duration, rounded to the nearest
    /// second. results past 47:59:59 are rejected, never clamped.
    pub fn plus(&self, duration: Time) -> Result<ServiceTime, TemporalError> {
        self.offset_seconds(duration_to_seconds(duration)?)
    }

    /// rewinds this time by a non-negative duration, rounded to the nearest
    /// second. results before 00:00:00 are rejected, never clamped.
    pub fn minus(&self, duration: Time) -> Result<ServiceTime, TemporalError> {
        self.offset_seconds(-duration_to_seconds(duration)?)
    }

    fn offset_seconds(&self, seconds: i64) -> Result<ServiceTime, TemporalError> {
        let result = self.0 as i64 + seconds;
        if result < 0 || result > MAX_SERVICE_SECONDS as i64 {
            return Err(TemporalError::OutsideServiceDay(result));
        }
        Ok(ServiceTime(result as u32))
    }
}

fn duration_to_seconds(duration: Time) -> Result<i64, TemporalError> {
    let seconds = duration.get::<uom::si::time::second>();
    if seconds < 0.0 {
        return Err(TemporalError::NegativeDuration(seconds));
    }
    Ok(seconds.round() as i64)
}

impl Display for ServiceTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

impl FromStr for ServiceTime {
    type Err = TemporalError;

    /// strictly parses the canonical zero-padded HH:MM:SS form so that
    /// parse and format round-trip losslessly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparseable = || TemporalError::UnparseableServiceTime(s.to_string());
        let parts: Vec<&str> = s.split(':').collect();
        let [h, m, sec] = parts.as_slice() else {
            return Err(unparseable());
        };
        for part in [h, m, sec] {
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(unparseable());
            }
        }
        let hour = h.parse::<u32>().map_err(|_| unparseable())?;
        let minute = m.parse::<u32>().map_err(|_| unparseable())?;
        let second = sec.parse::<u32>().map_err(|_| unparseable())?;
        ServiceTime::new(hour, minute, second)
    }
}

impl Serialize for ServiceTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ServiceTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let time_str = String::deserialize(deserializer)?;
        ServiceTime::from_str(&time_str)
            .map_err(|e| D::Error::custom(format!("invalid service time: {e}")))
    }
}

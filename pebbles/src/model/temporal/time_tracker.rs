use serde::{Deserialize, Serialize};
use uom::si::f64::Time;

use super::{ServiceTime, TemporalError};
use crate::model::PathDirection;

/// direction strategy for the time-expanded reachability search. riders,
/// readers, caches and comparators are written once against this capability
/// set instead of being duplicated per direction.
///
/// Forward answers "how far can I get from a start time"; Backward answers
/// the retrospective "where could I have started to arrive by a time".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeTracker {
    Forward,
    Backward,
}

impl TimeTracker {
    /// moves a time through the search direction: addition when riding
    /// forward, subtraction when riding retrospectively.
    pub fn adjust(&self, time: &ServiceTime, duration: Time) -> Result<ServiceTime, TemporalError> {
        match self {
            TimeTracker::Forward => time.plus(duration),
            TimeTracker::Backward => time.minus(duration),
        }
    }

    /// true iff a time sits within the cutoff in the direction of travel.
    /// the boundary is inclusive: landing exactly on the cutoff is allowed
    /// for both directions, only strictly passing it is not.
    pub fn within_cutoff(&self, time: &ServiceTime, cutoff: &ServiceTime) -> bool {
        match self {
            TimeTracker::Forward => time <= cutoff,
            TimeTracker::Backward => time >= cutoff,
        }
    }

    /// true iff adjusting `current` by `duration` stays within `cutoff`.
    /// adjustments that leave the service day cannot be taken.
    pub fn can_adjust(&self, current: &ServiceTime, duration: Time, cutoff: &ServiceTime) -> bool {
        match self.adjust(current, duration) {
            Ok(adjusted) => self.within_cutoff(&adjusted, cutoff),
            Err(_) => false,
        }
    }

    /// non-negative time budget remaining before the cutoff: cutoff − current
    /// when riding forward, current − cutoff when riding retrospectively,
    /// saturating at zero once the cutoff has been passed.
    pub fn elapsed_to_cutoff(&self, current: &ServiceTime, cutoff: &ServiceTime) -> Time {
        let seconds = match self {
            TimeTracker::Forward => cutoff.total_seconds() as i64 - current.total_seconds() as i64,
            TimeTracker::Backward => current.total_seconds() as i64 - cutoff.total_seconds() as i64,
        };
        Time::new::<uom::si::time::second>(seconds.max(0) as f64)
    }

    /// the path append strategy matching this direction.
    pub fn path_direction(&self) -> PathDirection {
        match self {
            TimeTracker::Forward => PathDirection::Forward,
            TimeTracker::Backward => PathDirection::Retrospective,
        }
    }
}

use std::fmt::Display;

use uom::si::f64::Length;
use uom::si::length::meter;
use uom::ConstZero;

use crate::model::temporal::ServiceTime;

/// one atomic hop of a path, either a walk between two locations or a
/// scheduled transit ride. movements always read chronologically: the
/// start never follows the end, whichever search direction produced them.
#[derive(Clone, Debug)]
pub enum Movement {
    Walk {
        from_id: String,
        to_id: String,
        distance: Length,
        start_time: ServiceTime,
        end_time: ServiceTime,
    },
    Ride {
        trip_id: String,
        route: String,
        board_stop: String,
        board_time: ServiceTime,
        deboard_stop: String,
        deboard_time: ServiceTime,
    },
}

impl Movement {
    pub fn start_time(&self) -> ServiceTime {
        match self {
            Movement::Walk { start_time, .. } => *start_time,
            Movement::Ride { board_time, .. } => *board_time,
        }
    }

    pub fn end_time(&self) -> ServiceTime {
        match self {
            Movement::Walk { end_time, .. } => *end_time,
            Movement::Ride { deboard_time, .. } => *deboard_time,
        }
    }

    /// walking distance contributed by this movement. rides contribute zero.
    pub fn walking_distance(&self) -> Length {
        match self {
            Movement::Walk { distance, .. } => *distance,
            Movement::Ride { .. } => Length::ZERO,
        }
    }

    pub fn is_ride(&self) -> bool {
        matches!(self, Movement::Ride { .. })
    }
}

impl Display for Movement {
    /// stable single-line descriptor. used for logging and as the final,
    /// deterministic tiebreak when two paths are otherwise equivalent.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Movement::Walk {
                from_id,
                to_id,
                distance,
                start_time,
                end_time,
            } => write!(
                f,
                "walk {from_id}->{to_id} {:.0}m {start_time}..{end_time}",
                distance.get::<meter>()
            ),
            Movement::Ride {
                trip_id,
                route,
                board_stop,
                board_time,
                deboard_stop,
                deboard_time,
            } => write!(
                f,
                "ride {trip_id} ({route}) {board_stop}->{deboard_stop} {board_time}..{deboard_time}"
            ),
        }
    }
}

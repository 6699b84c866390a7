use std::sync::Arc;

use super::entry_point::EntryPoint;
use super::traversal_error::TraversalError;
use super::trip::Trip;
use crate::model::temporal::{ServiceTime, TimeTracker};
use crate::model::Path;

/// where a rider currently sits: a stop, the scheduled time there, and the
/// path that reached it (ride movement included).
#[derive(Clone, Debug)]
pub struct RiderPosition {
    pub stop_id: String,
    pub time: ServiceTime,
    pub path: Path,
}

/// rider state. Exhausted is the normal terminal state: no further
/// scheduled visit lies within the cutoff.
#[derive(Clone, Debug)]
pub enum RiderStatus {
    Riding(RiderPosition),
    Exhausted,
}

/// state machine for one in-progress trip traversal. a rider boards at an
/// entry point and walks the trip's visit sequence in the tracker's
/// direction, one scheduled stop per `continue_trip` call, until the next
/// visit would pass the cutoff.
///
/// the path carries a single ride movement per boarding: every advance
/// re-appends board stop -> current stop onto the path that reached the
/// boarding, rather than accumulating one movement per intermediate stop.
pub struct Rider {
    tracker: TimeTracker,
    trip: Arc<Trip>,
    cutoff: ServiceTime,
    board_stop: String,
    board_time: ServiceTime,
    board_sequence: usize,
    base_path: Path,
    sequence: usize,
    stop_id: String,
    time: ServiceTime,
}

impl Rider {
    /// boards `trip` at `entry`. `path_to_stop` is the path that reached
    /// the boarding stop; it stays untouched until the first advance.
    pub(crate) fn new(
        tracker: TimeTracker,
        trip: Arc<Trip>,
        entry: &EntryPoint,
        path_to_stop: Path,
        cutoff: ServiceTime,
    ) -> Result<Rider, TraversalError> {
        let inconsistent = || TraversalError::InconsistentEntryPoint {
            trip_id: entry.trip_id.clone(),
            stop_id: entry.stop_id.clone(),
            sequence: entry.sequence,
        };
        if entry.trip_id != trip.trip_id {
            return Err(inconsistent());
        }
        let visit = trip.visit(entry.sequence).ok_or_else(inconsistent)?;
        if visit.stop_id != entry.stop_id || visit.time != entry.time {
            return Err(inconsistent());
        }
        Ok(Rider {
            tracker,
            trip,
            cutoff,
            board_stop: entry.stop_id.clone(),
            board_time: entry.time,
            board_sequence: entry.sequence,
            base_path: path_to_stop,
            sequence: entry.sequence,
            stop_id: entry.stop_id.clone(),
            time: entry.time,
        })
    }

    pub fn trip(&self) -> &Arc<Trip> {
        &self.trip
    }

    /// true iff the trip has another scheduled visit in the direction of
    /// travel and its time lies within the cutoff.
    pub fn can_continue_trip(&self) -> bool {
        match self.upcoming_visit() {
            Some((_, time)) => self.tracker.within_cutoff(&time, &self.cutoff),
            None => false,
        }
    }

    /// advances to the next scheduled visit and returns the new position.
    /// calling this while `can_continue_trip()` is false is a logic error.
    pub fn continue_trip(&mut self) -> Result<RiderStatus, TraversalError> {
        let (sequence, stop_id, time) = match self.upcoming_visit() {
            Some((sequence, time)) if self.tracker.within_cutoff(&time, &self.cutoff) => {
                let visit = self.trip.visit(sequence).ok_or_else(|| {
                    TraversalError::InconsistentEntryPoint {
                        trip_id: self.trip.trip_id.clone(),
                        stop_id: self.stop_id.clone(),
                        sequence,
                    }
                })?;
                (sequence, visit.stop_id.clone(), time)
            }
            _ => {
                return Err(TraversalError::RiderExhausted {
                    trip_id: self.trip.trip_id.clone(),
                    stop_id: self.stop_id.clone(),
                })
            }
        };
        self.sequence = sequence;
        self.stop_id = stop_id;
        self.time = time;
        Ok(RiderStatus::Riding(self.position()))
    }

    /// Riding at the current position while another visit remains within
    /// the cutoff, Exhausted otherwise.
    pub fn status(&self) -> RiderStatus {
        if self.can_continue_trip() {
            RiderStatus::Riding(self.position())
        } else {
            RiderStatus::Exhausted
        }
    }

    pub fn position(&self) -> RiderPosition {
        let path = if self.sequence == self.board_sequence {
            self.base_path.clone()
        } else {
            self.base_path.append_transit_ride(
                &self.trip.trip_id,
                &self.trip.route_name,
                &self.board_stop,
                &self.board_time,
                &self.stop_id,
                &self.time,
            )
        };
        RiderPosition {
            stop_id: self.stop_id.clone(),
            time: self.time,
            path,
        }
    }

    fn upcoming_visit(&self) -> Option<(usize, ServiceTime)> {
        let next = match self.tracker {
            TimeTracker::Forward => self.trip.next_visit(self.sequence),
            TimeTracker::Backward => self.trip.previous_visit(self.sequence),
        };
        next.map(|(sequence, visit)| (sequence, visit.time))
    }
}

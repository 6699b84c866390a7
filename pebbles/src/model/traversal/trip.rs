use serde::{Deserialize, Serialize};

use crate::model::temporal::ServiceTime;

/// one scheduled stop of a vehicle run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripVisit {
    pub stop_id: String,
    pub time: ServiceTime,
}

/// the ordered visit sequence of one scheduled vehicle run, indexed by
/// sequence position. trips load once from the network interchange and are
/// shared read-only (`Arc<Trip>`) between the schedule index and riders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub trip_id: String,
    pub route_id: String,
    pub route_name: String,
    pub visits: Vec<TripVisit>,
}

impl Trip {
    pub fn new(trip_id: &str, route_id: &str, route_name: &str, visits: Vec<TripVisit>) -> Trip {
        Trip {
            trip_id: trip_id.to_string(),
            route_id: route_id.to_string(),
            route_name: route_name.to_string(),
            visits,
        }
    }

    pub fn visit(&self, sequence: usize) -> Option<&TripVisit> {
        self.visits.get(sequence)
    }

    /// the visit after `sequence` on this run, none at the final stop.
    pub fn next_visit(&self, sequence: usize) -> Option<(usize, &TripVisit)> {
        let next = sequence.checked_add(1)?;
        self.visits.get(next).map(|visit| (next, visit))
    }

    /// the visit before `sequence` on this run, none at the first stop.
    pub fn previous_visit(&self, sequence: usize) -> Option<(usize, &TripVisit)> {
        let previous = sequence.checked_sub(1)?;
        self.visits.get(previous).map(|visit| (previous, visit))
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

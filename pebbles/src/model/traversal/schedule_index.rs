use std::collections::HashMap;
use std::sync::Arc;

use super::entry_point::EntryPoint;
use super::transit_network::TransitNetwork;
use super::traversal_error::TraversalError;
use super::trip::Trip;
use crate::model::key::{RangedKey, StopTimeKey};
use crate::model::store::{InMemoryRangeStore, RangeStore};
use crate::model::temporal::ServiceTime;

/// in-memory transit network over interchange trips. every scheduled visit
/// is indexed as an entry point row under its StopTimeKey, so a window
/// lookup is a single range scan plus row decoding.
pub struct ScheduleIndex {
    trips: HashMap<String, Arc<Trip>>,
    visits: InMemoryRangeStore,
}

impl ScheduleIndex {
    pub fn from_trips(trips: Vec<Trip>) -> Result<ScheduleIndex, TraversalError> {
        Self::index(trips.into_iter().map(Arc::new))
    }

    /// derives a reduced network without the named routes. kept trips are
    /// shared with this index, not copied.
    pub fn without_routes(&self, route_ids: &[String]) -> Result<ScheduleIndex, TraversalError> {
        let kept = self
            .trips
            .values()
            .filter(|trip| !route_ids.contains(&trip.route_id))
            .cloned();
        let reduced = Self::index(kept)?;
        log::info!(
            "derived network without routes {:?}: {} of {} trips kept",
            route_ids,
            reduced.trip_count(),
            self.trip_count()
        );
        Ok(reduced)
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    fn index(trips: impl Iterator<Item = Arc<Trip>>) -> Result<ScheduleIndex, TraversalError> {
        let mut by_id = HashMap::new();
        let visits = InMemoryRangeStore::new();
        for trip in trips {
            if trip.is_empty() {
                return Err(TraversalError::EmptyTrip(trip.trip_id.clone()));
            }
            if by_id.contains_key(&trip.trip_id) {
                return Err(TraversalError::DuplicateTrip(trip.trip_id.clone()));
            }
            for (sequence, visit) in trip.visits.iter().enumerate() {
                let key = StopTimeKey::new(&visit.stop_id, &visit.time)?;
                let entry = EntryPoint {
                    stop_id: visit.stop_id.clone(),
                    time: visit.time,
                    trip_id: trip.trip_id.clone(),
                    sequence,
                };
                let row = serde_json::to_value(&entry).map_err(|e| {
                    TraversalError::EntryPointEncoding {
                        trip_id: trip.trip_id.clone(),
                        message: e.to_string(),
                    }
                })?;
                visits.put(&key.encode(), row)?;
            }
            by_id.insert(trip.trip_id.clone(), trip);
        }
        Ok(ScheduleIndex {
            trips: by_id,
            visits,
        })
    }
}

impl TransitNetwork for ScheduleIndex {
    fn entry_points(
        &self,
        stop: &str,
        from: &ServiceTime,
        to: &ServiceTime,
    ) -> Result<Vec<EntryPoint>, TraversalError> {
        if from > to {
            return Ok(vec![]);
        }
        let min = StopTimeKey::window_min(stop, from)?;
        let max = StopTimeKey::window_max(stop, to)?;
        let rows = self.visits.scan(&min.encode(), &max.encode())?;
        let mut points = Vec::with_capacity(rows.len());
        for row in rows {
            let entry: EntryPoint = serde_json::from_value(row.value).map_err(|e| {
                TraversalError::MalformedEntryPoint {
                    key: row.key.clone(),
                    message: e.to_string(),
                }
            })?;
            points.push(entry);
        }
        // the scan orders by (time, uniquifier); refine to a stable,
        // run-independent ordering
        points.sort_by(|a, b| {
            (a.time, &a.trip_id, a.sequence).cmp(&(b.time, &b.trip_id, b.sequence))
        });
        Ok(points)
    }

    fn trip(&self, trip_id: &str) -> Option<Arc<Trip>> {
        self.trips.get(trip_id).cloned()
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::{ScheduleIndex, TransitNetwork};
    use crate::model::traversal::{Trip, TripVisit};
    use crate::model::temporal::ServiceTime;

    fn t(s: &str) -> ServiceTime {
        s.parse().expect("test invariant failed")
    }

    fn visit(stop: &str, time: &str) -> TripVisit {
        TripVisit {
            stop_id: stop.to_string(),
            time: t(time),
        }
    }

    fn two_route_schedule() -> ScheduleIndex {
        ScheduleIndex::from_trips(vec![
            Trip::new(
                "trip-1",
                "r1",
                "Route 1",
                vec![
                    visit("s1", "10:00:00"),
                    visit("s2", "10:05:00"),
                    visit("s3", "10:10:00"),
                ],
            ),
            Trip::new(
                "trip-2",
                "r2",
                "Route 2",
                vec![visit("s2", "10:03:00"), visit("s4", "10:12:00")],
            ),
        ])
        .expect("test invariant failed")
    }

    #[test]
    fn test_entry_points_within_window() {
        let index = two_route_schedule();
        let points = index
            .entry_points("s2", &t("10:00:00"), &t("10:05:00"))
            .expect("test invariant failed");
        let found: Vec<(&str, String)> = points
            .iter()
            .map(|p| (p.trip_id.as_str(), p.time.to_string()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("trip-2", String::from("10:03:00")),
                ("trip-1", String::from("10:05:00")),
            ]
        );
        assert_eq!(points[0].sequence, 0);
        assert_eq!(points[1].sequence, 1);
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let index = two_route_schedule();
        let points = index
            .entry_points("s1", &t("10:00:00"), &t("10:00:00"))
            .expect("test invariant failed");
        assert_eq!(points.len(), 1);
        // an unknown stop scans an empty window
        let none = index
            .entry_points("s99", &t("00:00:00"), &t("47:59:59"))
            .expect("test invariant failed");
        assert!(none.is_empty());
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let index = two_route_schedule();
        let points = index
            .entry_points("s2", &t("10:05:00"), &t("10:00:00"))
            .expect("test invariant failed");
        assert!(points.is_empty());
    }

    #[test]
    fn test_duplicate_and_empty_trips_rejected() {
        let duplicate = ScheduleIndex::from_trips(vec![
            Trip::new("trip-1", "r1", "Route 1", vec![visit("s1", "10:00:00")]),
            Trip::new("trip-1", "r1", "Route 1", vec![visit("s2", "10:05:00")]),
        ]);
        assert!(duplicate.is_err());
        let empty = ScheduleIndex::from_trips(vec![Trip::new("trip-9", "r9", "Route 9", vec![])]);
        assert!(empty.is_err());
    }

    #[test]
    fn test_without_routes_shares_kept_trips() {
        let index = two_route_schedule();
        let reduced = index
            .without_routes(&[String::from("r1")])
            .expect("test invariant failed");
        assert_eq!(reduced.trip_count(), 1);
        assert_eq!(index.trip_count(), 2);
        // the surviving trip is shared, not copied
        let original = index.trip("trip-2").expect("test invariant failed");
        let kept = reduced.trip("trip-2").expect("test invariant failed");
        assert!(Arc::ptr_eq(&original, &kept));
        // and the removed route's entry points are gone
        let points = reduced
            .entry_points("s1", &t("00:00:00"), &t("47:59:59"))
            .expect("test invariant failed");
        assert!(points.is_empty());
    }
}

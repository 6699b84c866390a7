use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use super::search_error::SearchError;
use super::search_outcome::{SearchArrival, SearchOutcome};
use super::search_task::SearchTask;
use crate::model::reachability::ReachabilityClient;
use crate::model::temporal::{ServiceTime, TimeTracker};
use crate::model::traversal::{RiderFactory, RiderStatus, ScheduleReader, TransitNetwork};
use crate::model::{Location, LocationTable, Path, PathDirection};

/// best-arrival table and expansion queue for one running task. a location
/// re-enters the queue only when a strictly better path replaces its
/// recorded one, so the expansion terminates once no candidate improves.
struct Frontier {
    center_id: String,
    best: HashMap<String, SearchArrival>,
    queue: VecDeque<SearchArrival>,
}

impl Frontier {
    fn seed(origin: Arc<Location>, start: ServiceTime, direction: PathDirection) -> Frontier {
        let center_id = origin.id().to_string();
        let arrival = SearchArrival::new(origin, start, Path::new(direction));
        let mut best = HashMap::new();
        best.insert(center_id.clone(), arrival.clone());
        Frontier {
            center_id,
            best,
            queue: VecDeque::from([arrival]),
        }
    }

    fn pop(&mut self) -> Option<SearchArrival> {
        self.queue.pop_front()
    }

    /// true once a strictly better path has replaced this state's record,
    /// making its queued expansion redundant.
    fn is_stale(&self, state: &SearchArrival) -> bool {
        match self.best.get(state.location().id()) {
            Some(best) => best.path() < state.path(),
            None => false,
        }
    }

    /// the improvement gate. an arrival is kept only when its path is
    /// strictly better than the recorded one; on a tie the first stays, so
    /// repeat runs produce identical output. the center itself is never
    /// replaced: its empty path means "present at the start", which no
    /// round trip can beat.
    fn record(&mut self, location: Arc<Location>, time: ServiceTime, path: Path) {
        if location.id() == self.center_id {
            return;
        }
        if let Some(existing) = self.best.get(location.id()) {
            if existing.path() <= &path {
                return;
            }
        }
        let key = location.id().to_string();
        let arrival = SearchArrival::new(location, time, path);
        self.best.insert(key, arrival.clone());
        self.queue.push_back(arrival);
    }

    fn into_arrivals(self) -> HashMap<String, SearchArrival> {
        self.best
    }
}

/// the per-task search driver. expands a frontier of arrivals in waves:
/// walking costs from the tiered cache, then scheduled rides from every
/// boardable entry point, both bounded by the task's cutoff through the
/// factory's tracker. when several paths reach the same location the path
/// ordering picks the winner.
pub struct SearchEngine {
    factory: RiderFactory,
    reachability: Arc<ReachabilityClient>,
    locations: Arc<LocationTable>,
}

impl SearchEngine {
    pub fn new(
        factory: RiderFactory,
        reachability: Arc<ReachabilityClient>,
        locations: Arc<LocationTable>,
    ) -> SearchEngine {
        SearchEngine {
            factory,
            reachability,
            locations,
        }
    }

    pub fn locations(&self) -> &Arc<LocationTable> {
        &self.locations
    }

    /// the same engine bound to a substituted transit network, for
    /// route-removal runs. this engine is left untouched; the cache and
    /// location table are shared.
    pub fn with_network(&self, network: Arc<dyn TransitNetwork>) -> SearchEngine {
        SearchEngine {
            factory: self.factory.with_network(network),
            reachability: Arc::clone(&self.reachability),
            locations: Arc::clone(&self.locations),
        }
    }

    pub fn run(&self, task: &SearchTask) -> Result<SearchOutcome, SearchError> {
        let tracker = self.factory.tracker();
        let (start, cutoff) = (task.start(), task.cutoff());
        if !tracker.within_cutoff(&start, &cutoff) {
            return Err(SearchError::InvalidWindow { start, cutoff });
        }
        let origin = self
            .locations
            .get(task.center().id())
            .ok_or_else(|| SearchError::UnknownLocation(task.center().id().to_string()))?;

        let reader = self.factory.schedule_reader();
        let mut frontier = Frontier::seed(Arc::clone(origin), start, tracker.path_direction());
        while let Some(state) = frontier.pop() {
            if frontier.is_stale(&state) {
                continue;
            }
            if expands_walks(state.path()) {
                self.walk_wave(&state, task, tracker, &mut frontier)?;
            }
            if state.location().is_transit_stop() {
                self.board_wave(&state, task, &reader, &mut frontier)?;
            }
        }

        let arrivals = frontier.into_arrivals();
        log::debug!(
            "search {} reached {} locations by {}",
            task.label(),
            arrivals.len(),
            cutoff
        );
        Ok(SearchOutcome::new(
            origin.id().to_string(),
            start,
            cutoff,
            arrivals,
        ))
    }

    /// walks from the state's location to everything the tiered cache says
    /// is reachable within the remaining budget.
    fn walk_wave(
        &self,
        state: &SearchArrival,
        task: &SearchTask,
        tracker: TimeTracker,
        frontier: &mut Frontier,
    ) -> Result<(), SearchError> {
        let costs = self.reachability.walking_costs(
            state.location(),
            &state.time(),
            &task.cutoff(),
            tracker,
        )?;
        for (destination_id, cost) in costs {
            let destination = self
                .locations
                .get(&destination_id)
                .ok_or_else(|| SearchError::UnknownLocation(destination_id.clone()))?;
            let time = tracker.adjust(&state.time(), cost.duration())?;
            let path = state.path().append_walk(
                state.location().id(),
                &state.time(),
                &destination_id,
                &time,
                cost.distance(),
            );
            frontier.record(Arc::clone(destination), time, path);
        }
        Ok(())
    }

    /// boards every entry point at the state's stop within the remaining
    /// window and rides each trip out to its last in-cutoff visit.
    fn board_wave(
        &self,
        state: &SearchArrival,
        task: &SearchTask,
        reader: &ScheduleReader,
        frontier: &mut Frontier,
    ) -> Result<(), SearchError> {
        let cutoff = task.cutoff();
        let entries = reader.entry_points(state.location().id(), &state.time(), &cutoff)?;
        for entry in entries {
            let mut rider = self.factory.rider(&entry, state.path().clone(), &cutoff)?;
            while rider.can_continue_trip() {
                match rider.continue_trip()? {
                    RiderStatus::Riding(position) => {
                        let stop = self.locations.get(&position.stop_id).ok_or_else(|| {
                            SearchError::UnknownLocation(position.stop_id.clone())
                        })?;
                        frontier.record(Arc::clone(stop), position.time, position.path);
                    }
                    RiderStatus::Exhausted => break,
                }
            }
        }
        Ok(())
    }
}

/// walking happens from the task center and after alighting a ride. a walk
/// directly after a walk folds into the single cached walk from the
/// earlier location, so chaining them only compounds estimate error.
fn expands_walks(path: &Path) -> bool {
    match path.latest_movement() {
        None => true,
        Some(movement) => movement.is_ride(),
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use geo::{coord, Point, Rect};
    use uom::si::f64::{Length, Velocity};
    use uom::si::length::meter;
    use uom::si::velocity::meter_per_second;

    use super::SearchEngine;
    use crate::model::grid::SectorTable;
    use crate::model::reachability::{ReachabilityClient, StoredDistanceEstimator};
    use crate::model::search::{SearchError, SearchTask};
    use crate::model::store::{InMemoryKvStore, InMemoryRangeStore};
    use crate::model::temporal::{ServiceTime, TimeTracker};
    use crate::model::traversal::{RiderFactory, ScheduleIndex, Trip, TripVisit};
    use crate::model::{Location, LocationTable};

    fn t(s: &str) -> ServiceTime {
        s.parse().expect("test invariant failed")
    }

    fn visit(stop: &str, time: &str) -> TripVisit {
        TripVisit {
            stop_id: stop.to_string(),
            time: t(time),
        }
    }

    fn route_7() -> Trip {
        Trip::new(
            "trip-1",
            "r7",
            "Route 7",
            vec![visit("s1", "10:05:00"), visit("s2", "10:20:00")],
        )
    }

    // two sectors splitting downtown denver at -104.94. c1 and s1 sit in
    // the west sector roughly 86m apart; s2 and c3 sit in the east sector
    // roughly 86m apart. the sides are linked by route 7 only: the 7.6km
    // between them is far past the 3km estimator maximum.
    fn locations() -> Vec<Location> {
        let bounds = Rect::new(
            coord! { x: -105.00, y: 39.70 },
            coord! { x: -104.88, y: 39.78 },
        );
        let grid = SectorTable::new("study", bounds, 1, 2).expect("test invariant failed");
        let mut locations: Vec<Location> =
            grid.sectors().iter().cloned().map(Location::from).collect();
        locations.push(
            Location::grid_point("c1", Point::new(-104.9900, 39.7392))
                .expect("test invariant failed"),
        );
        locations.push(
            Location::transit_stop("s1", "West Gate", Point::new(-104.9890, 39.7392))
                .expect("test invariant failed"),
        );
        locations.push(
            Location::transit_stop("s2", "East Gate", Point::new(-104.9000, 39.7392))
                .expect("test invariant failed"),
        );
        locations.push(
            Location::grid_point("c3", Point::new(-104.9010, 39.7392))
                .expect("test invariant failed"),
        );
        locations
    }

    fn engine(network: Arc<ScheduleIndex>, tracker: TimeTracker) -> SearchEngine {
        let table = Arc::new(LocationTable::new(locations()).expect("test invariant failed"));
        let estimator = StoredDistanceEstimator::new(
            Arc::clone(&table),
            Arc::new(InMemoryRangeStore::new()),
            Length::new::<meter>(3_000.0),
        )
        .expect("test invariant failed");
        let reachability = ReachabilityClient::new(
            Arc::new(estimator),
            None,
            Arc::new(InMemoryRangeStore::new()),
            Arc::new(InMemoryKvStore::new()),
            Velocity::new::<meter_per_second>(1.0),
        )
        .expect("test invariant failed");
        SearchEngine::new(
            RiderFactory::new(network, tracker),
            Arc::new(reachability),
            table,
        )
    }

    fn center(engine: &SearchEngine, id: &str) -> Arc<Location> {
        Arc::clone(engine.locations().get(id).expect("test invariant failed"))
    }

    #[test]
    fn test_forward_search_walks_rides_and_walks_again() {
        let network =
            Arc::new(ScheduleIndex::from_trips(vec![route_7()]).expect("test invariant failed"));
        let engine = engine(network, TimeTracker::Forward);
        let task = SearchTask::new(center(&engine, "c1"), t("10:00:00"), t("10:30:00"));
        let outcome = engine.run(&task).expect("test invariant failed");

        // center, its sector and stop on foot, then the ride across and the
        // east sector and c3 on foot from s2
        assert_eq!(outcome.len(), 6);
        assert_eq!(
            outcome.reached_sector_ids(),
            vec!["study:000000", "study:000001"]
        );

        let s2 = outcome.arrival("s2").expect("test invariant failed");
        assert_eq!(s2.time(), t("10:20:00"));
        assert_eq!(s2.path().len(), 2);
        assert!(s2
            .path()
            .to_string()
            .contains("ride trip-1 (Route 7) s1->s2"));

        // walk legs round through measured geometry, so pin windows rather
        // than exact seconds
        let s1 = outcome.arrival("s1").expect("test invariant failed");
        assert!(t("10:01:00") <= s1.time() && s1.time() <= t("10:02:00"));

        let c3 = outcome.arrival("c3").expect("test invariant failed");
        assert_eq!(c3.path().len(), 3, "c3 takes walk, ride, walk: {}", c3.path());
        assert!(t("10:21:00") <= c3.time() && c3.time() <= t("10:22:00"));

        // the east sector is a zero-meter step from s2
        let east = outcome
            .arrival("study:000001")
            .expect("test invariant failed");
        assert_eq!(east.time(), t("10:20:00"));

        let origin = outcome.arrival("c1").expect("test invariant failed");
        assert!(origin.path().is_empty());
    }

    #[test]
    fn test_competing_paths_resolve_by_ordering() {
        // trip-2 boards earlier but arrives later; the path ordering must
        // keep trip-1's earlier arrival at s2 and at the sector beyond it
        let network = Arc::new(
            ScheduleIndex::from_trips(vec![
                route_7(),
                Trip::new(
                    "trip-2",
                    "r9",
                    "Route 9",
                    vec![visit("s1", "10:02:00"), visit("s2", "10:25:00")],
                ),
            ])
            .expect("test invariant failed"),
        );
        let engine = engine(network, TimeTracker::Forward);
        let task = SearchTask::new(center(&engine, "c1"), t("10:00:00"), t("10:30:00"));
        let outcome = engine.run(&task).expect("test invariant failed");

        let s2 = outcome.arrival("s2").expect("test invariant failed");
        assert_eq!(s2.time(), t("10:20:00"));
        assert!(s2.path().to_string().contains("trip-1"));
        let east = outcome
            .arrival("study:000001")
            .expect("test invariant failed");
        assert_eq!(east.time(), t("10:20:00"));
    }

    #[test]
    fn test_backward_search_reads_chronologically() {
        // retrospective question: to be at c3 by 10:30, where could the
        // journey have started no earlier than 10:00?
        let network =
            Arc::new(ScheduleIndex::from_trips(vec![route_7()]).expect("test invariant failed"));
        let engine = engine(network, TimeTracker::Backward);
        let task = SearchTask::new(center(&engine, "c3"), t("10:30:00"), t("10:00:00"));
        let outcome = engine.run(&task).expect("test invariant failed");

        assert_eq!(
            outcome.reached_sector_ids(),
            vec!["study:000000", "study:000001"]
        );

        // s1 is reached by boarding at s2 and riding the schedule backward,
        // but its winning path still reads start -> end in wall-clock order
        let s1 = outcome.arrival("s1").expect("test invariant failed");
        assert_eq!(s1.time(), t("10:05:00"));
        let path = s1.path();
        assert_eq!(path.start_time(), Some(t("10:05:00")));
        assert_eq!(path.end_time(), Some(t("10:30:00")));
        assert!(path.movements()[0].is_ride());
        assert!(path.to_string().contains("ride trip-1 (Route 7) s1->s2"));

        // the west sector is walkable from s1 after alighting
        let west = outcome
            .arrival("study:000000")
            .expect("test invariant failed");
        assert_eq!(west.time(), t("10:05:00"));
    }

    #[test]
    fn test_route_removal_drops_dependent_arrivals() {
        let network =
            Arc::new(ScheduleIndex::from_trips(vec![route_7()]).expect("test invariant failed"));
        let engine = engine(Arc::clone(&network), TimeTracker::Forward);
        let task = SearchTask::new(center(&engine, "c1"), t("10:00:00"), t("10:30:00"));
        let baseline = engine.run(&task).expect("test invariant failed");
        assert_eq!(baseline.reached_sector_ids().len(), 2);

        let reduced = network
            .without_routes(&[String::from("r7")])
            .expect("test invariant failed");
        let outcome = engine
            .with_network(Arc::new(reduced))
            .run(&task)
            .expect("test invariant failed");

        // with route 7 removed only the walkable west side remains
        assert_eq!(outcome.reached_sector_ids(), vec!["study:000000"]);
        assert!(outcome.arrival("s2").is_none());

        // the baseline engine is untouched
        let again = engine.run(&task).expect("test invariant failed");
        assert_eq!(again.reached_sector_ids().len(), 2);
    }

    #[test]
    fn test_inverted_window_rejected() {
        let network =
            Arc::new(ScheduleIndex::from_trips(vec![]).expect("test invariant failed"));
        let engine = engine(network, TimeTracker::Forward);
        let task = SearchTask::new(center(&engine, "c1"), t("10:30:00"), t("10:00:00"));
        assert!(matches!(
            engine.run(&task),
            Err(SearchError::InvalidWindow { .. })
        ));
    }
}

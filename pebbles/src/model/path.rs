use std::cmp::Ordering;
use std::fmt::Display;

use itertools::Itertools;
use uom::si::f64::Length;
use uom::si::length::meter;
use uom::ConstZero;

use super::movement::Movement;
use super::path_direction::PathDirection;
use crate::model::temporal::ServiceTime;

/// an immutable sequence of movements from a fixed anchor to wherever a
/// traversal has reached. appends return a new path and leave the original
/// untouched, so concurrent riders can branch from a shared prefix.
///
/// movements are stored in chronological order regardless of direction:
/// forward paths grow at the tail, retrospective paths grow at the head
/// with the (from, to) roles of each append swapped.
#[derive(Clone, Debug)]
pub struct Path {
    direction: PathDirection,
    movements: Vec<Movement>,
}

impl Path {
    pub fn new(direction: PathDirection) -> Path {
        Path {
            direction,
            movements: vec![],
        }
    }

    pub fn direction(&self) -> PathDirection {
        self.direction
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    /// chronological start of the whole path, None when empty.
    pub fn start_time(&self) -> Option<ServiceTime> {
        self.movements.first().map(|m| m.start_time())
    }

    /// chronological end of the whole path, None when empty.
    pub fn end_time(&self) -> Option<ServiceTime> {
        self.movements.last().map(|m| m.end_time())
    }

    pub fn total_walking_distance(&self) -> Length {
        self.movements
            .iter()
            .fold(Length::ZERO, |acc, m| acc + m.walking_distance())
    }

    /// most recently appended movement: the tail of a forward path, the
    /// head of a retrospective one.
    pub fn latest_movement(&self) -> Option<&Movement> {
        match self.direction {
            PathDirection::Forward => self.movements.last(),
            PathDirection::Retrospective => self.movements.first(),
        }
    }

    /// extends this path with a walk. arguments are in search order: `from`
    /// is the current search position and `to` the newly reached location,
    /// so retrospective paths swap the pair before recording it.
    pub fn append_walk(
        &self,
        from_id: &str,
        from_time: &ServiceTime,
        to_id: &str,
        to_time: &ServiceTime,
        distance: Length,
    ) -> Path {
        let movement = match self.direction {
            PathDirection::Forward => Movement::Walk {
                from_id: from_id.to_string(),
                to_id: to_id.to_string(),
                distance,
                start_time: *from_time,
                end_time: *to_time,
            },
            PathDirection::Retrospective => Movement::Walk {
                from_id: to_id.to_string(),
                to_id: from_id.to_string(),
                distance,
                start_time: *to_time,
                end_time: *from_time,
            },
        };
        self.append(movement)
    }

    /// extends this path with a scheduled ride, with the same search-order
    /// argument convention as [`Path::append_walk`].
    pub fn append_transit_ride(
        &self,
        trip_id: &str,
        route: &str,
        from_stop: &str,
        from_time: &ServiceTime,
        to_stop: &str,
        to_time: &ServiceTime,
    ) -> Path {
        let movement = match self.direction {
            PathDirection::Forward => Movement::Ride {
                trip_id: trip_id.to_string(),
                route: route.to_string(),
                board_stop: from_stop.to_string(),
                board_time: *from_time,
                deboard_stop: to_stop.to_string(),
                deboard_time: *to_time,
            },
            PathDirection::Retrospective => Movement::Ride {
                trip_id: trip_id.to_string(),
                route: route.to_string(),
                board_stop: to_stop.to_string(),
                board_time: *to_time,
                deboard_stop: from_stop.to_string(),
                deboard_time: *from_time,
            },
        };
        self.append(movement)
    }

    fn append(&self, movement: Movement) -> Path {
        let mut movements = Vec::with_capacity(self.movements.len() + 1);
        match self.direction {
            PathDirection::Forward => {
                movements.extend_from_slice(&self.movements);
                movements.push(movement);
            }
            PathDirection::Retrospective => {
                movements.push(movement);
                movements.extend_from_slice(&self.movements);
            }
        }
        Path {
            direction: self.direction,
            movements,
        }
    }
}

impl Ord for Path {
    /// best-path total order where Less means preferred:
    ///   1. any path beats the empty path
    ///   2. earlier overall end
    ///   3. later overall start
    ///   4. smaller total walking distance
    ///   5. fewer movements
    ///   6. lexicographic movement descriptors, a stable deterministic tail
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.movements.is_empty(), other.movements.is_empty()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
        self.end_time()
            .cmp(&other.end_time())
            .then_with(|| other.start_time().cmp(&self.start_time()))
            .then_with(|| {
                self.total_walking_distance()
                    .get::<meter>()
                    .total_cmp(&other.total_walking_distance().get::<meter>())
            })
            .then_with(|| self.movements.len().cmp(&other.movements.len()))
            .then_with(|| {
                self.movements
                    .iter()
                    .map(|m| m.to_string())
                    .cmp(other.movements.iter().map(|m| m.to_string()))
            })
    }
}

impl PartialOrd for Path {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Path {}

impl Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.movements.is_empty() {
            return write!(f, "(no movements)");
        }
        write!(f, "{}", self.movements.iter().join("; "))
    }
}

#[cfg(test)]
mod test {
    use uom::si::f64::Length;
    use uom::si::length::meter;

    use super::{Path, PathDirection};
    use crate::model::temporal::ServiceTime;

    fn t(s: &str) -> ServiceTime {
        s.parse().expect("test invariant failed")
    }

    fn m(meters: f64) -> Length {
        Length::new::<meter>(meters)
    }

    /// walk origin -> s1, ride s1 -> s2, walk s2 -> dest, built forward.
    fn forward_commute() -> Path {
        Path::new(PathDirection::Forward)
            .append_walk("origin", &t("09:30:00"), "s1", &t("09:35:00"), m(400.0))
            .append_transit_ride(
                "trip-1",
                "Route 1",
                "s1",
                &t("09:40:00"),
                "s2",
                &t("09:55:00"),
            )
            .append_walk("s2", &t("09:55:00"), "dest", &t("10:00:00"), m(350.0))
    }

    #[test]
    fn test_forward_paths_grow_at_the_tail() {
        let path = forward_commute();
        assert_eq!(path.len(), 3);
        assert_eq!(path.start_time(), Some(t("09:30:00")));
        assert_eq!(path.end_time(), Some(t("10:00:00")));
        let times: Vec<_> = path
            .movements()
            .iter()
            .map(|m| (m.start_time(), m.end_time()))
            .collect();
        for pair in times.windows(2) {
            assert!(pair[0].1 <= pair[1].0, "movements out of order: {path}");
        }
        assert_eq!(path.total_walking_distance().get::<meter>(), 750.0);
    }

    #[test]
    fn test_retrospective_paths_read_chronologically() {
        // built from the destination anchored at 10:00:00, searching backward
        // through the same commute as the forward case
        let path = Path::new(PathDirection::Retrospective)
            .append_walk("dest", &t("10:00:00"), "s2", &t("09:55:00"), m(350.0))
            .append_transit_ride(
                "trip-1",
                "Route 1",
                "s2",
                &t("09:55:00"),
                "s1",
                &t("09:40:00"),
            )
            .append_walk("s1", &t("09:40:00"), "origin", &t("09:35:00"), m(400.0));
        assert_eq!(path.start_time(), Some(t("09:35:00")));
        assert_eq!(path.end_time(), Some(t("10:00:00")));
        let descriptors: Vec<String> = path.movements().iter().map(|m| m.to_string()).collect();
        assert_eq!(
            descriptors,
            vec![
                "walk origin->s1 400m 09:35:00..09:40:00",
                "ride trip-1 (Route 1) s1->s2 09:40:00..09:55:00",
                "walk s2->dest 350m 09:55:00..10:00:00",
            ]
        );
    }

    #[test]
    fn test_latest_movement_tracks_the_search_head() {
        let forward = forward_commute();
        assert_eq!(
            forward
                .latest_movement()
                .expect("test invariant failed")
                .end_time(),
            t("10:00:00")
        );
        let retro = Path::new(PathDirection::Retrospective)
            .append_walk("dest", &t("10:00:00"), "s2", &t("09:55:00"), m(350.0))
            .append_walk("s2", &t("09:55:00"), "s1", &t("09:50:00"), m(120.0));
        // the most recent retrospective append sits at the head
        assert_eq!(
            retro
                .latest_movement()
                .expect("test invariant failed")
                .start_time(),
            t("09:50:00")
        );
    }

    #[test]
    fn test_appends_branch_without_mutating_the_prefix() {
        let prefix = Path::new(PathDirection::Forward).append_walk(
            "origin",
            &t("09:00:00"),
            "s1",
            &t("09:05:00"),
            m(300.0),
        );
        let a = prefix.append_walk("s1", &t("09:05:00"), "s2", &t("09:10:00"), m(200.0));
        let b = prefix.append_walk("s1", &t("09:05:00"), "s3", &t("09:12:00"), m(420.0));
        assert_eq!(prefix.len(), 1);
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_any_path_beats_the_empty_path() {
        let empty = Path::new(PathDirection::Forward);
        let other_empty = Path::new(PathDirection::Forward);
        assert_eq!(empty, other_empty);
        assert!(forward_commute() < empty);
    }

    #[test]
    fn test_earlier_end_wins() {
        let slow = forward_commute(); // ends 10:00:00
        let fast = Path::new(PathDirection::Forward).append_walk(
            "origin",
            &t("09:30:00"),
            "dest",
            &t("09:58:00"),
            m(2000.0),
        );
        assert!(fast < slow);
    }

    #[test]
    fn test_later_start_wins_when_ends_tie() {
        let early_riser = Path::new(PathDirection::Forward).append_walk(
            "origin",
            &t("09:20:00"),
            "dest",
            &t("10:00:00"),
            m(500.0),
        );
        let late_riser = Path::new(PathDirection::Forward).append_walk(
            "origin",
            &t("09:30:00"),
            "dest",
            &t("10:00:00"),
            m(500.0),
        );
        assert!(late_riser < early_riser);
    }

    #[test]
    fn test_less_walking_wins_when_times_tie() {
        let direct = Path::new(PathDirection::Forward).append_walk(
            "origin",
            &t("09:30:00"),
            "dest",
            &t("10:00:00"),
            m(500.0),
        );
        let scenic = Path::new(PathDirection::Forward).append_walk(
            "origin",
            &t("09:30:00"),
            "dest",
            &t("10:00:00"),
            m(900.0),
        );
        assert!(direct < scenic);
    }

    #[test]
    fn test_fewer_movements_win_when_walking_ties() {
        let one_hop = Path::new(PathDirection::Forward).append_walk(
            "origin",
            &t("09:30:00"),
            "dest",
            &t("10:00:00"),
            m(500.0),
        );
        let two_hops = Path::new(PathDirection::Forward)
            .append_walk("origin", &t("09:30:00"), "mid", &t("09:45:00"), m(250.0))
            .append_walk("mid", &t("09:45:00"), "dest", &t("10:00:00"), m(250.0));
        assert!(one_hop < two_hops);
    }

    #[test]
    fn test_descriptor_tiebreak_is_deterministic() {
        let via_s1 = Path::new(PathDirection::Forward).append_walk(
            "origin",
            &t("09:30:00"),
            "s1",
            &t("10:00:00"),
            m(500.0),
        );
        let via_s2 = Path::new(PathDirection::Forward).append_walk(
            "origin",
            &t("09:30:00"),
            "s2",
            &t("10:00:00"),
            m(500.0),
        );
        // equivalent by every quality measure, so descriptors decide
        assert!(via_s1 < via_s2);
        assert!(via_s2 > via_s1);
        assert_eq!(via_s1, via_s1.clone());
    }
}

use std::sync::Arc;

use geo::{Distance, Haversine, Point};
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use serde_json::Value;
use uom::si::f64::Length;
use uom::si::length::meter;

use super::{DistanceEstimator, EstimatedReach, ReachabilityError};
use crate::model::key::{CrowDistanceKey, KeyError, RangedKey, MAX_DISTANCE_METERS};
use crate::model::store::RangeStore;
use crate::model::{Location, LocationTable};

/// meters per degree of latitude, for converting the precompute maximum
/// into a degree-space pruning radius.
const METERS_PER_DEGREE: f64 = 110_574.0;

/// widening applied to the pruning radius. the r-tree pass filters in
/// euclidean degree space and the exact measure rejects strays, so the
/// radius only has to be generous, not tight.
const PRUNE_PAD: f64 = 1.1;

struct LocationNode {
    location: Arc<Location>,
    envelope: AABB<[f64; 2]>,
}

impl LocationNode {
    fn new(location: Arc<Location>) -> LocationNode {
        let bounds = location.bounding_region();
        LocationNode {
            envelope: AABB::from_corners(
                [bounds.min().x, bounds.min().y],
                [bounds.max().x, bounds.max().y],
            ),
            location,
        }
    }
}

impl RTreeObject for LocationNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl PointDistance for LocationNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let nearest = self
            .location
            .nearest_point(&Point::new(point[0], point[1]));
        let dx = nearest.x() - point[0];
        let dy = nearest.y() - point[1];
        dx * dx + dy * dy
    }
}

/// a [`DistanceEstimator`] answering from a precomputed table of
/// great-circle distances, stored under [`CrowDistanceKey`] so that "all
/// locations within d meters of an origin" is a single range scan.
///
/// the precompute runs once per run and is skipped when the backing store
/// already holds rows, so a snapshot written by an earlier run can be
/// reused as-is.
pub struct StoredDistanceEstimator {
    locations: Arc<LocationTable>,
    store: Arc<dyn RangeStore>,
    max_distance: Length,
}

impl StoredDistanceEstimator {
    pub fn new(
        locations: Arc<LocationTable>,
        store: Arc<dyn RangeStore>,
        max_distance: Length,
    ) -> Result<StoredDistanceEstimator, ReachabilityError> {
        let max_meters = max_distance.get::<meter>();
        if !(0.0..=MAX_DISTANCE_METERS as f64).contains(&max_meters) {
            return Err(KeyError::OutOfDomain {
                field: "estimator maximum meters",
                value: max_meters as u64,
                max: MAX_DISTANCE_METERS as u64,
            }
            .into());
        }
        let estimator = StoredDistanceEstimator {
            locations,
            store,
            max_distance,
        };
        if estimator.store.is_empty()? {
            estimator.precompute()?;
        } else {
            log::info!(
                "distance table already holds {} rows, skipping precompute",
                estimator.store.len()?
            );
        }
        Ok(estimator)
    }

    pub fn max_distance(&self) -> Length {
        self.max_distance
    }

    /// measures and stores the great-circle distance from every point
    /// location to every location within the configured maximum. sectors
    /// are measured at their nearest boundary point, so a point inside a
    /// sector sits at distance zero from it.
    fn precompute(&self) -> Result<(), ReachabilityError> {
        let nodes: Vec<LocationNode> = self
            .locations
            .iter()
            .map(|location| LocationNode::new(Arc::clone(location)))
            .collect();
        let rtree = RTree::bulk_load(nodes);
        let max_meters = self.max_distance.get::<meter>();

        let mut rows = 0usize;
        for origin in self.locations.iter().filter(|l| l.is_point()) {
            let origin_point = origin.point();
            let query = [origin_point.x(), origin_point.y()];
            // degree-space radius, widened for longitude shrink away from
            // the equator
            let cos_lat = origin_point.y().to_radians().cos().max(0.01);
            let radius = max_meters / (METERS_PER_DEGREE * cos_lat) * PRUNE_PAD;
            for node in rtree.locate_within_distance(query, radius * radius) {
                if node.location.id() == origin.id() {
                    continue;
                }
                let nearest = node.location.nearest_point(&origin_point);
                let meters = Haversine.distance(origin_point, nearest);
                if meters > max_meters {
                    continue;
                }
                let key = CrowDistanceKey::new(origin.id(), meters.round() as u32)?;
                self.store.put(
                    &key.encode(),
                    Value::String(node.location.id().to_string()),
                )?;
                rows += 1;
            }
        }
        log::info!(
            "precomputed {} straight-line distance rows for {} locations",
            rows,
            self.locations.len()
        );
        Ok(())
    }
}

impl DistanceEstimator for StoredDistanceEstimator {
    /// a single range scan over the precomputed table, ascending by
    /// distance. never measures geometry.
    fn reachable_locations(
        &self,
        origin: &Location,
        distance: Length,
    ) -> Result<Vec<EstimatedReach>, ReachabilityError> {
        let requested = distance.get::<meter>();
        let max_meters = self.max_distance.get::<meter>();
        if requested > max_meters {
            return Err(ReachabilityError::DistanceBeyondMaximum {
                requested_meters: requested.ceil() as u32,
                max_meters: max_meters.round() as u32,
            });
        }
        if self.locations.get(origin.id()).is_none() {
            return Err(ReachabilityError::UnknownOrigin(origin.id().to_string()));
        }

        let upper = CrowDistanceKey::window_max(origin.id(), requested.round() as u32)?;
        let lower = upper.range_min();
        let entries = self.store.scan(&lower.encode(), &upper.encode())?;

        let mut reaches = Vec::with_capacity(entries.len());
        for entry in entries {
            let key = CrowDistanceKey::decode(&entry.key)?;
            let destination_id =
                entry
                    .value
                    .as_str()
                    .ok_or_else(|| ReachabilityError::MalformedDistanceRow {
                        key: entry.key.clone(),
                        message: "expected a destination id string value".to_string(),
                    })?;
            let location = self.locations.get(destination_id).ok_or_else(|| {
                ReachabilityError::MalformedDistanceRow {
                    key: entry.key.clone(),
                    message: format!("destination '{destination_id}' is not in the location table"),
                }
            })?;
            reaches.push(EstimatedReach::new(
                Arc::clone(location),
                Length::new::<meter>(key.distance_meters() as f64),
            ));
        }
        Ok(reaches)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use geo::{coord, Point, Rect};
    use uom::si::f64::Length;
    use uom::si::length::meter;

    use super::StoredDistanceEstimator;
    use crate::model::grid::SectorTable;
    use crate::model::reachability::{DistanceEstimator, ReachabilityError};
    use crate::model::store::{InMemoryRangeStore, RangeStore};
    use crate::model::{Location, LocationTable};

    // downtown denver stops: s2 sits roughly 480m east of s1, s3 roughly
    // 7.7km east of both
    fn denver_locations() -> Vec<Location> {
        let bounds = Rect::new(
            coord! { x: -105.00, y: 39.70 },
            coord! { x: -104.95, y: 39.75 },
        );
        let table = SectorTable::new("study", bounds, 1, 1).expect("test invariant failed");
        let sector = table.sectors()[0].clone();
        vec![
            Location::from(sector),
            Location::transit_stop("s1", "Union Station", Point::new(-104.9903, 39.7392))
                .expect("test invariant failed"),
            Location::transit_stop("s2", "18th & Stout", Point::new(-104.9847, 39.7392))
                .expect("test invariant failed"),
            Location::transit_stop("s3", "Colfax Station", Point::new(-104.9000, 39.7392))
                .expect("test invariant failed"),
        ]
    }

    fn estimator(
        store: Arc<dyn RangeStore>,
        max_meters: f64,
    ) -> StoredDistanceEstimator {
        let locations =
            Arc::new(LocationTable::new(denver_locations()).expect("test invariant failed"));
        StoredDistanceEstimator::new(locations, store, Length::new::<meter>(max_meters))
            .expect("test invariant failed")
    }

    fn origin() -> Location {
        Location::transit_stop("s1", "Union Station", Point::new(-104.9903, 39.7392))
            .expect("test invariant failed")
    }

    #[test]
    fn test_reachable_locations_within_radius() {
        let store: Arc<dyn RangeStore> = Arc::new(InMemoryRangeStore::new());
        let estimator = estimator(Arc::clone(&store), 5_000.0);

        let reaches = estimator
            .reachable_locations(&origin(), Length::new::<meter>(1_000.0))
            .expect("test invariant failed");
        let ids: Vec<&str> = reaches.iter().map(|r| r.location().id()).collect();
        // s1 sits inside the sector, so the sector is reachable at zero
        // meters and sorts first; s3 is past the precompute maximum
        assert_eq!(ids, vec!["study:000000", "s2"]);
        assert_eq!(reaches[0].distance().get::<meter>(), 0.0);
        let s2_meters = reaches[1].distance().get::<meter>();
        assert!(
            (s2_meters - 480.0).abs() < 15.0,
            "expected s2 around 480m from s1, found {s2_meters}m"
        );
    }

    #[test]
    fn test_scan_radius_excludes_farther_rows() {
        let store: Arc<dyn RangeStore> = Arc::new(InMemoryRangeStore::new());
        let estimator = estimator(Arc::clone(&store), 5_000.0);

        let reaches = estimator
            .reachable_locations(&origin(), Length::new::<meter>(100.0))
            .expect("test invariant failed");
        let ids: Vec<&str> = reaches.iter().map(|r| r.location().id()).collect();
        assert_eq!(ids, vec!["study:000000"]);
    }

    #[test]
    fn test_beyond_maximum_is_fatal() {
        let store: Arc<dyn RangeStore> = Arc::new(InMemoryRangeStore::new());
        let estimator = estimator(Arc::clone(&store), 5_000.0);

        assert!(matches!(
            estimator.reachable_locations(&origin(), Length::new::<meter>(5_001.0)),
            Err(ReachabilityError::DistanceBeyondMaximum {
                requested_meters: 5_001,
                max_meters: 5_000,
            })
        ));
    }

    #[test]
    fn test_unknown_origin_rejected() {
        let store: Arc<dyn RangeStore> = Arc::new(InMemoryRangeStore::new());
        let estimator = estimator(Arc::clone(&store), 5_000.0);

        let ghost = Location::landmark("ghost", "Nowhere", Point::new(-104.99, 39.74))
            .expect("test invariant failed");
        assert!(matches!(
            estimator.reachable_locations(&ghost, Length::new::<meter>(100.0)),
            Err(ReachabilityError::UnknownOrigin(id)) if id == "ghost"
        ));
    }

    #[test]
    fn test_precompute_skipped_when_store_populated() {
        let store: Arc<dyn RangeStore> = Arc::new(InMemoryRangeStore::new());
        let first = estimator(Arc::clone(&store), 5_000.0);
        let rows = store.len().expect("test invariant failed");
        assert!(rows > 0);

        // distance rows carry a random uniquifier, so a second precompute
        // over the same store would add rows rather than replace them
        let second = estimator(Arc::clone(&store), 5_000.0);
        assert_eq!(store.len().expect("test invariant failed"), rows);
        drop((first, second));
    }
}

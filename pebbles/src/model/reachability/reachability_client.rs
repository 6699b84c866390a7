use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use uom::si::f64::{Length, Velocity};
use uom::si::time::second;

use super::{DistanceClient, DistanceEstimator, EstimatedReach, ReachabilityError, WalkingCost};
use crate::model::key::{ElapsedTimeKey, RangedKey, MAX_ELAPSED_SECONDS};
use crate::model::store::{KvStore, RangeStore};
use crate::model::temporal::{ServiceTime, TimeTracker};
use crate::model::Location;

/// tiered walking-cost cache. requests escalate through progressively more
/// expensive sources: the range store of already-measured costs, then the
/// distance estimator for candidates, then the exact client when one is
/// configured. a per-origin marker records the largest budget ever resolved
/// so that repeat requests at or below it never leave the store.
pub struct ReachabilityClient {
    estimator: Arc<dyn DistanceEstimator>,
    exact: Option<Arc<dyn DistanceClient>>,
    costs: Arc<dyn RangeStore>,
    markers: Arc<dyn KvStore>,
    walking_speed: Velocity,
}

impl ReachabilityClient {
    pub fn new(
        estimator: Arc<dyn DistanceEstimator>,
        exact: Option<Arc<dyn DistanceClient>>,
        costs: Arc<dyn RangeStore>,
        markers: Arc<dyn KvStore>,
        walking_speed: Velocity,
    ) -> Result<ReachabilityClient, ReachabilityError> {
        let meters_per_second = walking_speed.get::<uom::si::velocity::meter_per_second>();
        if !meters_per_second.is_finite() || meters_per_second <= 0.0 {
            return Err(ReachabilityError::InvalidWalkingSpeed(meters_per_second));
        }
        Ok(ReachabilityClient {
            estimator,
            exact,
            costs,
            markers,
            walking_speed,
        })
    }

    /// walking costs from `origin` to every location reachable between
    /// `current` and `cutoff` in the tracker's direction, keyed by
    /// destination location id.
    pub fn walking_costs(
        &self,
        origin: &Location,
        current: &ServiceTime,
        cutoff: &ServiceTime,
        tracker: TimeTracker,
    ) -> Result<HashMap<String, WalkingCost>, ReachabilityError> {
        let budget = tracker.elapsed_to_cutoff(current, cutoff);
        // budgets past one day of walking saturate at the key domain maximum
        let budget_seconds = (budget.get::<second>().floor() as u32).min(MAX_ELAPSED_SECONDS);

        let marker = self.marker(origin.id())?;
        let mut costs = self.cached_costs(origin.id(), budget_seconds)?;
        if marker.is_some_and(|m| m >= budget_seconds) {
            return Ok(costs);
        }

        log::debug!(
            "cache escalation for origin '{}': marker {marker:?}, requested {budget_seconds}s",
            origin.id()
        );
        let reach: Length = budget * self.walking_speed;
        let candidates = self.estimator.reachable_locations(origin, reach)?;
        let unresolved: Vec<EstimatedReach> = candidates
            .into_iter()
            .filter(|c| c.location().id() != origin.id() && !costs.contains_key(c.location().id()))
            .collect();

        let resolved: HashMap<String, WalkingCost> = if unresolved.is_empty() {
            HashMap::new()
        } else {
            match &self.exact {
                Some(client) => client.walking_costs(origin, &unresolved, budget)?,
                // estimate short-circuit mode: no exact client is
                // configured, so the straight-line cost stands in for the
                // measured one
                None => unresolved
                    .iter()
                    .map(|c| {
                        (
                            c.location().id().to_string(),
                            WalkingCost::from_distance_at(c.distance(), self.walking_speed),
                        )
                    })
                    .collect(),
            }
        };

        for (destination_id, cost) in &resolved {
            let key = ElapsedTimeKey::new(origin.id(), cost.elapsed_seconds(), destination_id)?;
            let row =
                serde_json::to_value(cost).map_err(|e| ReachabilityError::CostRowEncoding {
                    origin_id: origin.id().to_string(),
                    message: e.to_string(),
                })?;
            self.costs.put(&key.encode(), row)?;
        }
        self.raise_marker(origin.id(), marker, budget_seconds)?;

        // costs resolved past the requested budget stay cached but are
        // excluded from this result
        for (destination_id, cost) in resolved {
            if cost.elapsed_seconds() <= budget_seconds {
                costs.insert(destination_id, cost);
            }
        }
        Ok(costs)
    }

    /// the per-origin maximum cached duration, present once any request has
    /// been resolved for this origin.
    fn marker(&self, origin_id: &str) -> Result<Option<u32>, ReachabilityError> {
        match self.markers.get(origin_id)? {
            None => Ok(None),
            Some(value) => {
                let seconds = value
                    .as_u64()
                    .filter(|s| *s <= MAX_ELAPSED_SECONDS as u64)
                    .ok_or_else(|| ReachabilityError::MalformedMarker {
                        origin_id: origin_id.to_string(),
                        value: value.to_string(),
                    })?;
                Ok(Some(seconds as u32))
            }
        }
    }

    fn cached_costs(
        &self,
        origin_id: &str,
        budget_seconds: u32,
    ) -> Result<HashMap<String, WalkingCost>, ReachabilityError> {
        let min = ElapsedTimeKey::window_min(origin_id, 0)?;
        let max = ElapsedTimeKey::window_max(origin_id, budget_seconds)?;
        let entries = self.costs.scan(&min.encode(), &max.encode())?;
        let mut costs = HashMap::with_capacity(entries.len());
        for entry in entries {
            let key = ElapsedTimeKey::decode(&entry.key)?;
            let cost: WalkingCost = serde_json::from_value(entry.value.clone()).map_err(|e| {
                ReachabilityError::MalformedCostRow {
                    key: entry.key.clone(),
                    message: e.to_string(),
                }
            })?;
            costs.insert(key.destination_id().to_string(), cost);
        }
        Ok(costs)
    }

    /// the marker only grows. two tasks sharing an origin may race here;
    /// last-writer-wins costs a redundant recomputation later, never a
    /// wrong result.
    fn raise_marker(
        &self,
        origin_id: &str,
        previous: Option<u32>,
        budget_seconds: u32,
    ) -> Result<(), ReachabilityError> {
        let next = previous.unwrap_or(0).max(budget_seconds);
        self.markers.put(origin_id, Value::from(next))?;
        Ok(())
    }
}

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use geo::Point;
use kdam::{Bar, BarExt};
use rayon::prelude::*;
use uom::si::f64::{Length, Time, Velocity};
use uom::si::length::meter;
use uom::si::time::second;
use uom::si::velocity::meter_per_second;

use super::config::ScoreAppConfig;
use super::score_error::ScoreError;
use super::score_row::{ScoreReport, ScoreRow};
use crate::model::grid::SectorTable;
use crate::model::reachability::{DistanceClient, ReachabilityClient, StoredDistanceEstimator};
use crate::model::search::{SearchEngine, SearchTask};
use crate::model::store::{snapshot, InMemoryKvStore, InMemoryRangeStore, RangeStore};
use crate::model::temporal::TimeTracker;
use crate::model::traversal::{NetworkInterchange, RiderFactory, ScheduleIndex, TransitNetwork};
use crate::model::{Location, LocationTable};

/// the batch scoring driver: one engine, one task list, one report.
///
/// construction is the expensive phase (interchange load, location
/// assembly, distance precompute); `run` and its variants only traverse.
/// tasks are independent, so a failed task is logged and skipped without
/// disturbing its siblings.
pub struct ScoreApp {
    engine: SearchEngine,
    network: Arc<ScheduleIndex>,
    reachability: Arc<ReachabilityClient>,
    costs: Arc<InMemoryRangeStore>,
    cost_snapshot: Option<String>,
    service_date: NaiveDate,
    direction: TimeTracker,
    tasks: Vec<SearchTask>,
    parallelism: Option<usize>,
}

impl TryFrom<&ScoreAppConfig> for ScoreApp {
    type Error = ScoreError;

    fn try_from(config: &ScoreAppConfig) -> Result<ScoreApp, ScoreError> {
        ScoreApp::build(config, None)
    }
}

impl ScoreApp {
    /// builds the app with an exact distance client attached; without one,
    /// walking costs resolve in estimate short-circuit mode.
    pub fn with_distance_client(
        config: &ScoreAppConfig,
        exact: Arc<dyn DistanceClient>,
    ) -> Result<ScoreApp, ScoreError> {
        ScoreApp::build(config, Some(exact))
    }

    fn build(
        config: &ScoreAppConfig,
        exact: Option<Arc<dyn DistanceClient>>,
    ) -> Result<ScoreApp, ScoreError> {
        if config.centers.is_empty() {
            return Err(ScoreError::InvalidConfig(String::from(
                "at least one center is required",
            )));
        }
        if config.search.start_times.is_empty() {
            return Err(ScoreError::InvalidConfig(String::from(
                "at least one start time is required",
            )));
        }
        if config.search.budget_seconds == 0 {
            return Err(ScoreError::InvalidConfig(String::from(
                "the search budget must be positive",
            )));
        }

        let grid = SectorTable::new(
            &config.grid.name,
            config.grid.bounds(),
            config.grid.rows,
            config.grid.cols,
        )?;
        let interchange = NetworkInterchange::from_file(Path::new(&config.network_file))?;

        let mut locations: Vec<Location> =
            grid.sectors().iter().cloned().map(Location::from).collect();
        locations.extend(interchange.stop_locations()?);
        for landmark in &config.landmarks {
            let name = landmark.name.as_deref().unwrap_or(&landmark.id);
            locations.push(Location::landmark(
                &landmark.id,
                name,
                Point::new(landmark.lon, landmark.lat),
            )?);
        }
        for center in &config.centers {
            locations.push(Location::grid_point(
                &center.id,
                Point::new(center.lon, center.lat),
            )?);
        }
        let table = Arc::new(LocationTable::new(locations)?);

        // the distance table reloads from its snapshot when one is present;
        // a fresh precompute writes the snapshot back for the next run
        let distances = Arc::new(InMemoryRangeStore::new());
        let distance_snapshot = config
            .reachability
            .distance_snapshot
            .as_deref()
            .map(Path::new);
        if let Some(path) = distance_snapshot {
            if path.exists() {
                snapshot::load(path, distances.as_ref())?;
            }
        }
        let needs_precompute = distances.is_empty()?;
        let estimator = StoredDistanceEstimator::new(
            Arc::clone(&table),
            Arc::clone(&distances) as Arc<dyn RangeStore>,
            Length::new::<meter>(config.reachability.max_crow_distance_meters),
        )?;
        if needs_precompute {
            if let Some(path) = distance_snapshot {
                snapshot::write(distances.as_ref(), path)?;
            }
        }

        let costs = Arc::new(InMemoryRangeStore::new());
        if let Some(path) = config.reachability.cost_snapshot.as_deref().map(Path::new) {
            if path.exists() {
                snapshot::load(path, costs.as_ref())?;
            }
        }
        let reachability = Arc::new(ReachabilityClient::new(
            Arc::new(estimator),
            exact,
            Arc::clone(&costs) as Arc<dyn RangeStore>,
            Arc::new(InMemoryKvStore::new()),
            Velocity::new::<meter_per_second>(
                config.reachability.walking_speed_meters_per_second,
            ),
        )?);

        let direction = config.search.direction;
        let service_date = interchange.service_date;
        let network = Arc::new(ScheduleIndex::from_trips(interchange.trips)?);
        let engine = SearchEngine::new(
            RiderFactory::new(Arc::clone(&network) as Arc<dyn TransitNetwork>, direction),
            Arc::clone(&reachability),
            Arc::clone(&table),
        );

        let budget = Time::new::<second>(config.search.budget_seconds as f64);
        let mut tasks =
            Vec::with_capacity(config.centers.len() * config.search.start_times.len());
        for center in &config.centers {
            let location = table.get(&center.id).ok_or_else(|| {
                ScoreError::InvalidConfig(format!(
                    "center '{}' is not in the location table",
                    center.id
                ))
            })?;
            for start in &config.search.start_times {
                tasks.push(SearchTask::from_budget(
                    Arc::clone(location),
                    *start,
                    budget,
                    direction,
                )?);
            }
        }
        log::info!(
            "score app ready for {service_date}: {} locations, {} trips, {} tasks",
            table.len(),
            network.trip_count(),
            tasks.len()
        );

        Ok(ScoreApp {
            engine,
            network,
            reachability,
            costs,
            cost_snapshot: config.reachability.cost_snapshot.clone(),
            service_date,
            direction,
            tasks,
            parallelism: config.parallelism,
        })
    }

    pub fn tasks(&self) -> &[SearchTask] {
        &self.tasks
    }

    /// scores every task against the configured network.
    pub fn run(&self) -> Result<ScoreReport, ScoreError> {
        self.execute(&self.engine)
    }

    /// scores every task against the network with the named routes removed,
    /// leaving this app's own configuration untouched.
    pub fn run_without_routes(&self, route_ids: &[String]) -> Result<ScoreReport, ScoreError> {
        let reduced = self.network.without_routes(route_ids)?;
        let engine = self.engine.with_network(Arc::new(reduced));
        self.execute(&engine)
    }

    /// resolves walking costs for every distinct center at the full budget
    /// ahead of scoring, so the searches start from a warm cache. returns
    /// the number of centers warmed.
    pub fn prewarm(&self) -> Result<usize, ScoreError> {
        let mut seen = HashSet::new();
        let centers: Vec<&SearchTask> = self
            .tasks
            .iter()
            .filter(|task| seen.insert(task.center().id().to_string()))
            .collect();
        let progress = Arc::new(Mutex::new(
            Bar::builder()
                .desc("prewarm walking costs")
                .total(centers.len())
                .build()
                .map_err(ScoreError::Progress)?,
        ));
        let warmed: usize = self.worker_pool()?.install(|| {
            centers
                .par_iter()
                .map(|task| {
                    let result = self.reachability.walking_costs(
                        task.center(),
                        &task.start(),
                        &task.cutoff(),
                        self.direction,
                    );
                    if let Ok(mut bar) = progress.lock() {
                        let _ = bar.update(1);
                    }
                    match result {
                        Ok(costs) => {
                            log::debug!(
                                "prewarmed {} walking costs from '{}'",
                                costs.len(),
                                task.center().id()
                            );
                            1
                        }
                        Err(e) => {
                            log::warn!("prewarm failed for center '{}': {e}", task.center().id());
                            0
                        }
                    }
                })
                .sum()
        });
        eprintln!();
        log::info!("prewarmed walking costs for {warmed} of {} centers", centers.len());
        Ok(warmed)
    }

    /// writes every resolved walking cost to the configured cost snapshot,
    /// returning the row count.
    pub fn persist_walking_costs(&self) -> Result<usize, ScoreError> {
        match self.cost_snapshot.as_deref() {
            Some(path) => Ok(snapshot::write(self.costs.as_ref(), Path::new(path))?),
            None => Err(ScoreError::InvalidConfig(String::from(
                "no cost snapshot file is configured",
            ))),
        }
    }

    fn worker_pool(&self) -> Result<rayon::ThreadPool, ScoreError> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.parallelism.unwrap_or(0))
            .build()
            .map_err(|e| ScoreError::WorkerPool(e.to_string()))
    }

    fn execute(&self, engine: &SearchEngine) -> Result<ScoreReport, ScoreError> {
        let progress = Arc::new(Mutex::new(
            Bar::builder()
                .desc("score tasks")
                .total(self.tasks.len())
                .build()
                .map_err(ScoreError::Progress)?,
        ));
        let results: Vec<_> = self.worker_pool()?.install(|| {
            self.tasks
                .par_iter()
                .map(|task| {
                    let result = engine.run(task);
                    if let Ok(mut bar) = progress.lock() {
                        let _ = bar.update(1);
                    }
                    (task.label(), result)
                })
                .collect()
        });
        eprintln!();

        let mut rows = Vec::with_capacity(results.len());
        let mut failed = 0usize;
        for (label, result) in results {
            match result {
                Ok(outcome) => rows.push(ScoreRow::from_outcome(&outcome)),
                Err(e) => {
                    failed += 1;
                    log::error!("score task {label} failed: {e}");
                }
            }
        }
        log::info!("scored {} tasks, {failed} failed", rows.len());
        Ok(ScoreReport::new(self.service_date, rows, failed))
    }
}

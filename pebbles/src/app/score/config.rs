use std::path::Path;

use geo::{coord, Rect};
use serde::{Deserialize, Serialize};

use super::score_error::ScoreError;
use crate::model::temporal::{ServiceTime, TimeTracker};

/// the score run configuration document, loaded from TOML. field values are
/// plain unit-suffixed numbers here; [`super::ScoreApp`] converts them into
/// typed quantities and validates them when it is built.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoreAppConfig {
    /// network interchange file holding the service day's stops and trips.
    pub network_file: String,
    /// worker pool size; defaults to one worker per core.
    pub parallelism: Option<usize>,
    pub grid: GridConfig,
    #[serde(default)]
    pub landmarks: Vec<PointConfig>,
    pub centers: Vec<PointConfig>,
    pub search: SearchConfig,
    pub reachability: ReachabilityConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridConfig {
    pub name: String,
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
    pub rows: usize,
    pub cols: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PointConfig {
    pub id: String,
    /// display name; anonymous points fall back to their id.
    pub name: Option<String>,
    pub lon: f64,
    pub lat: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    pub direction: TimeTracker,
    /// one task per (center, start time) pair.
    pub start_times: Vec<ServiceTime>,
    pub budget_seconds: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReachabilityConfig {
    pub walking_speed_meters_per_second: f64,
    /// distance estimator precompute maximum.
    pub max_crow_distance_meters: f64,
    /// snapshot file for the precomputed distance table; loaded when it
    /// exists, written after a fresh precompute.
    pub distance_snapshot: Option<String>,
    /// snapshot file for resolved walking costs; loaded when it exists,
    /// written by [`super::ScoreApp::persist_walking_costs`].
    pub cost_snapshot: Option<String>,
}

impl ScoreAppConfig {
    pub fn from_file(path: &Path) -> Result<ScoreAppConfig, ScoreError> {
        let text = std::fs::read_to_string(path).map_err(|e| ScoreError::ConfigRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| ScoreError::ConfigRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl GridConfig {
    pub fn bounds(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lon, y: self.min_lat },
            coord! { x: self.max_lon, y: self.max_lat },
        )
    }
}

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDate;
use geo::Point;
use serde::{Deserialize, Serialize};

use super::traversal_error::TraversalError;
use super::trip::Trip;
use crate::model::key::KeyError;
use crate::model::Location;

/// a stop row of the network interchange file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InterchangeStop {
    pub stop_id: String,
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

/// the network interchange document: the JSON handoff from schedule
/// ingestion, carrying every stop and every scheduled trip for one service
/// day. visit times use the canonical HH:MM:SS codec and may pass 24:00:00
/// for service that runs past midnight of `service_date`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkInterchange {
    pub service_date: NaiveDate,
    pub stops: Vec<InterchangeStop>,
    pub trips: Vec<Trip>,
}

impl NetworkInterchange {
    pub fn from_file(path: &Path) -> Result<NetworkInterchange, TraversalError> {
        let file = File::open(path).map_err(|e| TraversalError::InterchangeRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let interchange: NetworkInterchange = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| TraversalError::InterchangeRead {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        log::info!(
            "read network interchange {} for {}: {} stops, {} trips",
            path.display(),
            interchange.service_date,
            interchange.stops.len(),
            interchange.trips.len()
        );
        Ok(interchange)
    }

    /// every stop as a transit stop location.
    pub fn stop_locations(&self) -> Result<Vec<Location>, KeyError> {
        self.stops
            .iter()
            .map(|stop| Location::transit_stop(&stop.stop_id, &stop.name, Point::new(stop.lon, stop.lat)))
            .collect()
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::temporal::ServiceTime;
use crate::model::{Location, Path};

/// a reached location, the winning path to it, and the time there.
#[derive(Clone, Debug)]
pub struct SearchArrival {
    location: Arc<Location>,
    time: ServiceTime,
    path: Path,
}

impl SearchArrival {
    pub(crate) fn new(location: Arc<Location>, time: ServiceTime, path: Path) -> SearchArrival {
        SearchArrival {
            location,
            time,
            path,
        }
    }

    pub fn location(&self) -> &Arc<Location> {
        &self.location
    }

    pub fn time(&self) -> ServiceTime {
        self.time
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// everything one task reached: the winning arrival per location id. the
/// scoring layer folds these into per-sector counts.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    center_id: String,
    start: ServiceTime,
    cutoff: ServiceTime,
    arrivals: HashMap<String, SearchArrival>,
}

impl SearchOutcome {
    pub(crate) fn new(
        center_id: String,
        start: ServiceTime,
        cutoff: ServiceTime,
        arrivals: HashMap<String, SearchArrival>,
    ) -> SearchOutcome {
        SearchOutcome {
            center_id,
            start,
            cutoff,
            arrivals,
        }
    }

    pub fn center_id(&self) -> &str {
        &self.center_id
    }

    pub fn start(&self) -> ServiceTime {
        self.start
    }

    pub fn cutoff(&self) -> ServiceTime {
        self.cutoff
    }

    pub fn arrivals(&self) -> &HashMap<String, SearchArrival> {
        &self.arrivals
    }

    pub fn arrival(&self, location_id: &str) -> Option<&SearchArrival> {
        self.arrivals.get(location_id)
    }

    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }

    /// ids of the reached sector locations, sorted so folds and logs keep a
    /// stable order across repeated runs.
    pub fn reached_sector_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .arrivals
            .values()
            .filter(|arrival| matches!(arrival.location().as_ref(), Location::Sector(_)))
            .map(|arrival| arrival.location().id())
            .collect();
        ids.sort_unstable();
        ids
    }
}

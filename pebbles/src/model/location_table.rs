use std::collections::HashMap;
use std::sync::Arc;

use super::Location;
use crate::model::key::KeyError;

/// id-to-location registry shared by the distance estimator, the search
/// engine, and score folding. iteration follows insertion order so that
/// passes over the table are deterministic run to run.
#[derive(Clone, Debug)]
pub struct LocationTable {
    by_id: HashMap<String, usize>,
    locations: Vec<Arc<Location>>,
}

impl LocationTable {
    pub fn new(locations: Vec<Location>) -> Result<LocationTable, KeyError> {
        let mut by_id = HashMap::with_capacity(locations.len());
        let mut stored = Vec::with_capacity(locations.len());
        for location in locations {
            let id = location.id().to_string();
            if by_id.insert(id.clone(), stored.len()).is_some() {
                return Err(KeyError::DuplicateId(id));
            }
            stored.push(Arc::new(location));
        }
        Ok(LocationTable {
            by_id,
            locations: stored,
        })
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Location>> {
        self.by_id.get(id).map(|index| &self.locations[*index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Location>> {
        self.locations.iter()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

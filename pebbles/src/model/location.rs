use geo::{Point, Rect};

use crate::model::grid::Sector;
use crate::model::key::{validate_id, KeyError};

/// a region or point that can serve as a walking origin or destination.
///
/// the variant set is closed and small, so call sites match exhaustively
/// instead of dispatching through a visitor. ids are stable within a run
/// and across cache reads and writes; they are the cache key material, so
/// constructors apply the key id charset rules.
#[derive(Clone, Debug, PartialEq)]
pub enum Location {
    /// an axis-aligned cell of the study grid.
    Sector(Sector),
    /// a boardable stop of the transit network.
    TransitStop {
        id: String,
        name: String,
        point: Point<f64>,
    },
    /// a named point of interest.
    Landmark {
        id: String,
        name: String,
        point: Point<f64>,
    },
    /// an anonymous sampling point, typically a sector centroid.
    GridPoint { id: String, point: Point<f64> },
}

impl Location {
    pub fn transit_stop(id: &str, name: &str, point: Point<f64>) -> Result<Location, KeyError> {
        validate_id("stop id", id)?;
        Ok(Location::TransitStop {
            id: id.to_string(),
            name: name.to_string(),
            point,
        })
    }

    pub fn landmark(id: &str, name: &str, point: Point<f64>) -> Result<Location, KeyError> {
        validate_id("landmark id", id)?;
        Ok(Location::Landmark {
            id: id.to_string(),
            name: name.to_string(),
            point,
        })
    }

    pub fn grid_point(id: &str, point: Point<f64>) -> Result<Location, KeyError> {
        validate_id("grid point id", id)?;
        Ok(Location::GridPoint {
            id: id.to_string(),
            point,
        })
    }

    /// stable string identifier, unique within a run.
    pub fn id(&self) -> &str {
        match self {
            Location::Sector(sector) => sector.id(),
            Location::TransitStop { id, .. } => id,
            Location::Landmark { id, .. } => id,
            Location::GridPoint { id, .. } => id,
        }
    }

    /// human-readable name; anonymous variants fall back to their id.
    pub fn name(&self) -> &str {
        match self {
            Location::Sector(sector) => sector.id(),
            Location::TransitStop { name, .. } => name,
            Location::Landmark { name, .. } => name,
            Location::GridPoint { id, .. } => id,
        }
    }

    /// canonical point for distance estimation.
    pub fn point(&self) -> Point<f64> {
        match self {
            Location::Sector(sector) => sector.centroid(),
            Location::TransitStop { point, .. } => *point,
            Location::Landmark { point, .. } => *point,
            Location::GridPoint { point, .. } => *point,
        }
    }

    /// the point of this location nearest to an external point: identity
    /// for point variants, clamped-to-bounds projection for sectors.
    pub fn nearest_point(&self, point: &Point<f64>) -> Point<f64> {
        match self {
            Location::Sector(sector) => sector.nearest_point(point),
            _ => self.point(),
        }
    }

    pub fn bounding_region(&self) -> Rect<f64> {
        match self {
            Location::Sector(sector) => *sector.bounds(),
            _ => {
                let p = self.point();
                Rect::new(p.0, p.0)
            }
        }
    }

    /// true for locations modeled as a single point. point locations are
    /// the walking origins of the distance estimator precompute.
    pub fn is_point(&self) -> bool {
        !matches!(self, Location::Sector(_))
    }

    pub fn is_transit_stop(&self) -> bool {
        matches!(self, Location::TransitStop { .. })
    }
}

impl From<Sector> for Location {
    fn from(sector: Sector) -> Location {
        Location::Sector(sector)
    }
}

use geo::{Point, Rect};

use crate::model::key::{GridCellKey, RangedKey};

/// one axis-aligned cell of a sector grid, identified by its grid cell key
/// encoding. immutable after construction by its [`super::SectorTable`].
#[derive(Clone, Debug, PartialEq)]
pub struct Sector {
    id: String,
    sequence: u32,
    bounds: Rect<f64>,
}

impl Sector {
    pub(crate) fn new(key: &GridCellKey, bounds: Rect<f64>) -> Sector {
        Sector {
            id: key.encode(),
            sequence: key.sequence(),
            bounds,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn bounds(&self) -> &Rect<f64> {
        &self.bounds
    }

    /// canonical point for distance estimation.
    pub fn centroid(&self) -> Point<f64> {
        self.bounds.center().into()
    }

    /// the point of this sector closest to `point`: the point itself when
    /// inside the bounds, otherwise its projection clamped to the boundary.
    pub fn nearest_point(&self, point: &Point<f64>) -> Point<f64> {
        let x = point.x().clamp(self.bounds.min().x, self.bounds.max().x);
        let y = point.y().clamp(self.bounds.min().y, self.bounds.max().y);
        Point::new(x, y)
    }

    /// true iff the point lies within the bounds, edges inclusive.
    pub fn contains(&self, point: &Point<f64>) -> bool {
        let (min, max) = (self.bounds.min(), self.bounds.max());
        min.x <= point.x() && point.x() <= max.x && min.y <= point.y() && point.y() <= max.y
    }
}

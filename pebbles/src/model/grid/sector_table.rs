use geo::{coord, Point, Rect};

use super::{GridError, Sector};
use crate::model::key::{GridCellKey, MAX_CELL_SEQUENCE};

/// partitions a bounding region into a rows x cols grid of equal
/// [`Sector`]s, laid out row-major from the minimum corner.
#[derive(Clone, Debug)]
pub struct SectorTable {
    grid_name: String,
    bounds: Rect<f64>,
    rows: usize,
    cols: usize,
    sectors: Vec<Sector>,
}

impl SectorTable {
    pub fn new(
        grid_name: &str,
        bounds: Rect<f64>,
        rows: usize,
        cols: usize,
    ) -> Result<SectorTable, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyTable { rows, cols });
        }
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return Err(GridError::DegenerateBounds {
                width: bounds.width(),
                height: bounds.height(),
            });
        }
        let max_cells = MAX_CELL_SEQUENCE as usize + 1;
        if rows.saturating_mul(cols) > max_cells {
            return Err(GridError::TooManyCells {
                rows,
                cols,
                max: max_cells,
            });
        }

        let cell_width = bounds.width() / cols as f64;
        let cell_height = bounds.height() / rows as f64;
        let mut sectors = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let sequence = (row * cols + col) as u32;
                let key = GridCellKey::new(grid_name, sequence)?;
                let min_x = bounds.min().x + col as f64 * cell_width;
                let min_y = bounds.min().y + row as f64 * cell_height;
                let cell = Rect::new(
                    coord! { x: min_x, y: min_y },
                    coord! { x: min_x + cell_width, y: min_y + cell_height },
                );
                sectors.push(Sector::new(&key, cell));
            }
        }
        Ok(SectorTable {
            grid_name: grid_name.to_string(),
            bounds,
            rows,
            cols,
            sectors,
        })
    }

    pub fn grid_name(&self) -> &str {
        &self.grid_name
    }

    pub fn bounds(&self) -> &Rect<f64> {
        &self.bounds
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    /// the sector whose bounds contain `point`, or None outside the table's
    /// total bounds. points exactly on a maximum edge resolve into the last
    /// row or column, so every in-bounds point maps to exactly one sector.
    pub fn find_sector(&self, point: &Point<f64>) -> Option<&Sector> {
        let (min, max) = (self.bounds.min(), self.bounds.max());
        if point.x() < min.x || point.x() > max.x || point.y() < min.y || point.y() > max.y {
            return None;
        }
        let col_f = (point.x() - min.x) / self.bounds.width() * self.cols as f64;
        let row_f = (point.y() - min.y) / self.bounds.height() * self.rows as f64;
        let col = (col_f.floor() as usize).min(self.cols - 1);
        let row = (row_f.floor() as usize).min(self.rows - 1);
        self.sectors.get(row * self.cols + col)
    }
}

use crate::model::key::KeyError;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("sector table requires at least one row and one column, found {rows}x{cols}")]
    EmptyTable { rows: usize, cols: usize },
    #[error("sector table bounds must have positive extent, found width {width} and height {height}")]
    DegenerateBounds { width: f64, height: f64 },
    #[error("sector table of {rows}x{cols} cells exceeds the {max} encodable grid cells")]
    TooManyCells { rows: usize, cols: usize, max: usize },
    #[error(transparent)]
    InvalidCellKey(#[from] KeyError),
}

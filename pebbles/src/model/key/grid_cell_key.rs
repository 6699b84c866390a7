use super::ranged_key::RangedKey;
use super::{key_ops, KeyError};

/// largest row-major cell sequence a sector grid may carry.
pub const MAX_CELL_SEQUENCE: u32 = 999_999;

const CELL_SEPARATOR: char = ':';
const SEQUENCE_WIDTH: usize = 6;

/// row-major cell identifier within a named sector grid: `grid:SSSSSS`.
///
/// this family deliberately avoids the `|` field separator so its encoding
/// can itself serve as the id of a sector inside other keys' id fields
/// (sectors are walking destinations, and their ids are cache key
/// material).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridCellKey {
    grid_name: String,
    sequence: u32,
}

impl GridCellKey {
    pub fn new(grid_name: &str, sequence: u32) -> Result<GridCellKey, KeyError> {
        key_ops::validate_id("grid name", grid_name)?;
        if grid_name.contains(CELL_SEPARATOR) {
            return Err(KeyError::InvalidIdField {
                field: "grid name",
                value: grid_name.to_string(),
                reason: format!("grid names may not contain '{CELL_SEPARATOR}'"),
            });
        }
        if sequence > MAX_CELL_SEQUENCE {
            return Err(KeyError::OutOfDomain {
                field: "cell sequence",
                value: sequence as u64,
                max: MAX_CELL_SEQUENCE as u64,
            });
        }
        Ok(GridCellKey {
            grid_name: grid_name.to_string(),
            sequence,
        })
    }

    pub fn grid_name(&self) -> &str {
        &self.grid_name
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }
}

impl RangedKey for GridCellKey {
    fn encode(&self) -> String {
        // six digits cover the 999_999 domain maximum
        format!("{}{CELL_SEPARATOR}{:06}", self.grid_name, self.sequence)
    }

    fn decode(encoded: &str) -> Result<GridCellKey, KeyError> {
        let fail = |reason: String| KeyError::Unmaterializable {
            key_type: "GridCellKey",
            encoded: encoded.to_string(),
            reason,
        };
        let parts: Vec<&str> = encoded.split(CELL_SEPARATOR).collect();
        let [grid_name, sequence_str] = parts.as_slice() else {
            return Err(fail("expected two colon-separated fields".to_string()));
        };
        key_ops::validate_id("grid name", grid_name).map_err(|e| fail(e.to_string()))?;
        let sequence = key_ops::parse_fixed_width(
            "cell sequence",
            sequence_str,
            SEQUENCE_WIDTH,
            MAX_CELL_SEQUENCE,
        )
        .map_err(|e| fail(e.to_string()))?;
        Ok(GridCellKey {
            grid_name: grid_name.to_string(),
            sequence,
        })
    }

    fn range_min(&self) -> GridCellKey {
        GridCellKey {
            grid_name: self.grid_name.clone(),
            sequence: 0,
        }
    }

    fn range_max(&self) -> GridCellKey {
        GridCellKey {
            grid_name: self.grid_name.clone(),
            sequence: MAX_CELL_SEQUENCE,
        }
    }
}

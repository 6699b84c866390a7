mod crow_distance_key;
mod elapsed_time_key;
mod grid_cell_key;
mod key_error;
mod key_ops;
mod ranged_key;
mod stop_time_key;

pub use crow_distance_key::{CrowDistanceKey, MAX_DISTANCE_METERS};
pub use elapsed_time_key::{ElapsedTimeKey, MAX_ELAPSED_SECONDS};
pub use grid_cell_key::{GridCellKey, MAX_CELL_SEQUENCE};
pub use key_error::KeyError;
pub use key_ops::validate_id;
pub use ranged_key::{RangedKey, SENTINEL, SEPARATOR, UNIQUIFIER_LEN};
pub use stop_time_key::StopTimeKey;

pub mod grid;
pub mod key;
mod location;
mod location_table;
mod movement;
mod path;
mod path_direction;
pub mod reachability;
pub mod search;
pub mod store;
pub mod temporal;
pub mod traversal;

pub use location::Location;
pub use location_table::LocationTable;
pub use movement::Movement;
pub use path::Path;
pub use path_direction::PathDirection;

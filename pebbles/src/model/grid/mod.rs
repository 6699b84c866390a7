mod grid_error;
mod sector;
mod sector_table;

pub use grid_error::GridError;
pub use sector::Sector;
pub use sector_table::SectorTable;

//! JSON snapshot persistence for range stores. cached distance rows are
//! expensive to recompute, so runs write their range store to disk on
//! completion and later runs reload it before searching.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::range_store::RangeStore;
use super::store_entry::StoreEntry;
use super::store_error::StoreError;

/// loads every row of a snapshot file into `store`, returning the row count.
pub fn load(path: &Path, store: &dyn RangeStore) -> Result<usize, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::SnapshotRead {
        path: path.display().to_string(),
        source: e,
    })?;
    let rows: Vec<StoreEntry> =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            StoreError::MalformedSnapshot {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;
    let count = rows.len();
    for row in rows {
        store.put(&row.key, row.value)?;
    }
    log::info!("loaded {} rows from snapshot {}", count, path.display());
    Ok(count)
}

/// writes the full contents of `store` to a snapshot file, returning the
/// row count.
pub fn write(store: &dyn RangeStore, path: &Path) -> Result<usize, StoreError> {
    let rows = store.scan_all()?;
    let file = File::create(path).map_err(|e| StoreError::SnapshotWrite {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::to_writer(BufWriter::new(file), &rows).map_err(|e| {
        StoreError::MalformedSnapshot {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })?;
    log::info!("wrote {} rows to snapshot {}", rows.len(), path.display());
    Ok(rows.len())
}

use serde_json::Value;

use super::store_entry::StoreEntry;
use super::store_error::StoreError;

/// ordered store over encoded range keys. scans are closed on both bounds
/// and return entries in ascending key order; combined with the key
/// encoding contract this makes "all rows sharing a logical prefix" a
/// single scan between the key's synthetic minimum and maximum.
pub trait RangeStore: Send + Sync {
    /// inserts or replaces the row under `key`.
    fn put(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// all rows with `min <= key <= max`, ascending by key.
    fn scan(&self, min: &str, max: &str) -> Result<Vec<StoreEntry>, StoreError>;

    /// every row in the store, ascending by key.
    fn scan_all(&self) -> Result<Vec<StoreEntry>, StoreError>;

    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

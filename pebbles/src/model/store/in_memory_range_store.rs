use std::ops::Bound;
use std::sync::RwLock;

use serde_json::Value;
use skiplist::OrderedSkipList;

use super::range_store::RangeStore;
use super::store_entry::StoreEntry;
use super::store_error::StoreError;

/// range store over an ordered skip list of entries. entry ordering is
/// key-only, so bound queries use `StoreEntry::query` shells the same way
/// point lookups do.
pub struct InMemoryRangeStore {
    entries: RwLock<OrderedSkipList<StoreEntry>>,
}

impl InMemoryRangeStore {
    pub fn new() -> InMemoryRangeStore {
        InMemoryRangeStore {
            entries: RwLock::new(OrderedSkipList::new()),
        }
    }
}

impl Default for InMemoryRangeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeStore for InMemoryRangeStore {
    fn put(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        // the skip list accepts duplicates; remove any row under this key
        // first so put has replace semantics
        entries.remove(&StoreEntry::query(key));
        entries.insert(StoreEntry::new(key, value));
        Ok(())
    }

    fn scan(&self, min: &str, max: &str) -> Result<Vec<StoreEntry>, StoreError> {
        if min > max {
            return Err(StoreError::InvalidScanBounds {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        let lower = StoreEntry::query(min);
        let upper = StoreEntry::query(max);
        let rows = entries
            .range(Bound::Included(&lower), Bound::Included(&upper))
            .cloned()
            .collect();
        Ok(rows)
    }

    fn scan_all(&self) -> Result<Vec<StoreEntry>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        Ok(entries.iter().cloned().collect())
    }

    fn len(&self) -> Result<usize, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        Ok(entries.len())
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::{InMemoryRangeStore, RangeStore};

    #[test]
    fn test_scan_is_closed_on_both_bounds() {
        let store = InMemoryRangeStore::new();
        // inserted out of order; scans come back sorted by key
        for key in ["b|00300", "a|00100", "b|00100", "b|00200", "c|00100"] {
            store.put(key, json!(key)).expect("test invariant failed");
        }
        let rows = store
            .scan("b|00100", "b|00300")
            .expect("test invariant failed");
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["b|00100", "b|00200", "b|00300"]);
    }

    #[test]
    fn test_put_replaces_rows_under_the_same_key() {
        let store = InMemoryRangeStore::new();
        store.put("a|00100", json!(1)).expect("test invariant failed");
        store.put("a|00100", json!(2)).expect("test invariant failed");
        assert_eq!(store.len().expect("test invariant failed"), 1);
        let rows = store.scan("a|00100", "a|00100").expect("test invariant failed");
        assert_eq!(rows[0].value, json!(2));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let store = InMemoryRangeStore::new();
        assert!(store.scan("b", "a").is_err());
    }

    #[test]
    fn test_empty_scan_returns_no_rows() {
        let store = InMemoryRangeStore::new();
        store.put("a|00100", json!(1)).expect("test invariant failed");
        let rows = store.scan("b", "c").expect("test invariant failed");
        assert!(rows.is_empty());
        assert!(!store.is_empty().expect("test invariant failed"));
    }
}

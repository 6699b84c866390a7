use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use super::kv_store::KvStore;
use super::store_error::StoreError;

#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl InMemoryKvStore {
    pub fn new() -> InMemoryKvStore {
        InMemoryKvStore {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl KvStore for InMemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

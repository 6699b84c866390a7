use serde_json::Value;

use super::store_error::StoreError;

/// plain key-to-value store with atomic per-key put/get. the backing
/// implementation is opaque to callers; last-writer-wins on concurrent
/// puts to the same key.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    fn put(&self, key: &str, value: Value) -> Result<(), StoreError>;
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// one row of a range store: an encoded key and its JSON value. equality
/// and ordering consider the key alone so that entries order by the
/// lexicographic key contract regardless of payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreEntry {
    pub key: String,
    pub value: Value,
}

impl StoreEntry {
    pub fn new(key: &str, value: Value) -> StoreEntry {
        StoreEntry {
            key: key.to_string(),
            value,
        }
    }

    /// creates a query into an OrderedSkipList<StoreEntry>: a 'dummy'
    /// entry carrying only the bound key, for range and removal lookups.
    pub fn query(key: &str) -> StoreEntry {
        StoreEntry {
            key: key.to_string(),
            value: Value::Null,
        }
    }
}

impl PartialEq for StoreEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl PartialOrd for StoreEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.key.partial_cmp(&other.key)
    }
}

mod in_memory_kv_store;
mod in_memory_range_store;
mod kv_store;
mod range_store;
pub mod snapshot;
mod store_entry;
mod store_error;

pub use in_memory_kv_store::InMemoryKvStore;
pub use in_memory_range_store::InMemoryRangeStore;
pub use kv_store::KvStore;
pub use range_store::RangeStore;
pub use store_entry::StoreEntry;
pub use store_error::StoreError;

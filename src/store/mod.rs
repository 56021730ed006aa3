//! Persisted batch-size configuration.
//!
//! The resolver only needs a key-value view keyed by `"{prefix}{canonical_entity}"`.
//! Values come back untyped because dashboards and older writers may have
//! stored sizes as strings.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use serde_json::Value;
use crate::utils::StoreResult;

/// Key-value store holding user-configured batch sizes.
pub trait ConfigStore: Send + Sync {
    /// Reads a value; `Ok(None)` when the key was never set.
    fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Writes a size, replacing any previous value.
    fn set(&self, key: &str, value: i64) -> StoreResult<()>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: i64) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

impl<S: ConfigStore + ?Sized> ConfigStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: i64) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use serde_json::Value;
use crate::store::ConfigStore;
use crate::utils::{StoreError, StoreResult};

/// In-process store, mostly for tests and embedding hosts without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with raw values, which need not be integers.
    pub fn with_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let entries = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            entries: RwLock::new(entries),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent `set` fail with [`StoreError::Rejected`].
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.entries.read()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: i64) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::Rejected(key.to_string()));
        }
        self.entries.write()?.insert(key.to_string(), Value::from(value));
        Ok(())
    }
}

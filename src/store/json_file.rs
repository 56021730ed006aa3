use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use serde_json::{Map, Value};
use tracing::debug;
use crate::store::ConfigStore;
use crate::utils::{StoreError, StoreResult};

/// Settings file holding one JSON object, rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<Map<String, Value>>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Map::new(),
            Ok(text) => match serde_json::from_str::<Value>(&text) {
                Ok(Value::Object(map)) => map,
                Ok(_) => return Err(StoreError::corrupt(&path, "expected a JSON object")),
                Err(e) => return Err(StoreError::corrupt(&path, e.to_string())),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(StoreError::io(&path, e)),
        };
        debug!("Opened settings store {} ({} keys)", path.display(), entries.len());
        Ok(Self { path, entries: RwLock::new(entries) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &Map<String, Value>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let text = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::corrupt(&self.path, e.to_string()))?;
        fs::write(&self.path, text).map_err(|e| StoreError::io(&self.path, e))
    }
}

impl ConfigStore for JsonFileStore {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.entries.read()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: i64) -> StoreResult<()> {
        let mut entries = self.entries.write()?;
        let previous = entries.insert(key.to_string(), Value::from(value));
        if let Err(e) = self.persist(&entries) {
            // Keep memory consistent with disk.
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("settings.json")).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        {
            let store = JsonFileStore::open(&path).unwrap();
            store.set("sync_batch_size_pedidos", 75).unwrap();
        }
        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("sync_batch_size_pedidos").unwrap(), Some(json!(75)));
    }

    #[test]
    fn non_object_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(JsonFileStore::open(&path), Err(StoreError::Corrupt(..))));

        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(JsonFileStore::open(&path), Err(StoreError::Corrupt(..))));
    }
}

//! File-backed durable key-value store.

use std::collections::BTreeMap;
use std::path::PathBuf;

use labfinder_core::error::Result;
use labfinder_core::storage::KeyValueStore;

use super::atomic_file::AtomicJsonFile;

type Entries = BTreeMap<String, String>;

/// The durable "local storage" slot set, kept as one JSON object of
/// key -> string in a single file.
///
/// Every mutation is a locked read-modify-write of the whole file, so two
/// processes sharing a data directory never lose each other's keys. A file
/// that does not parse is treated as empty on read and replaced on the next
/// write.
pub struct FileKeyValueStore {
    file: AtomicJsonFile<Entries>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    fn entries(&self) -> Result<Entries> {
        match self.file.load() {
            Ok(entries) => Ok(entries.unwrap_or_default()),
            Err(e) if e.is_parse_error() => {
                tracing::warn!(path = ?self.file.path(), error = %e, "Ignoring unreadable local storage");
                Ok(Entries::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.file.update(Entries::new(), |entries| {
            entries.insert(key.to_string(), value.to_string());
            Ok(())
        })?;
        tracing::debug!(key, "Local storage entry written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if !self.file.path().exists() {
            return Ok(());
        }
        self.file.update(Entries::new(), |entries| {
            entries.remove(key);
            Ok(())
        })?;
        tracing::debug!(key, "Local storage entry removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("local_storage.json");

        let store = FileKeyValueStore::new(path.clone());
        store.set("userProfile", r#"{"name":"Jo"}"#).unwrap();
        store.set("theme", "dark").unwrap();
        drop(store);

        let reopened = FileKeyValueStore::new(path);
        assert_eq!(
            reopened.get("userProfile").unwrap().as_deref(),
            Some(r#"{"name":"Jo"}"#)
        );
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_remove_keeps_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("ls.json"));
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_remove_without_file_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ls.json");
        let store = FileKeyValueStore::new(path.clone());
        store.remove("userProfile").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_unreadable_file_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ls.json");
        fs::write(&path, "[1, 2").unwrap();

        let store = FileKeyValueStore::new(path);
        assert_eq!(store.get("userProfile").unwrap(), None);

        store.set("userProfile", "{}").unwrap();
        assert_eq!(store.get("userProfile").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_is_plain_json_object() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ls.json");
        FileKeyValueStore::new(path.clone()).set("k", "v").unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({ "k": "v" }));
    }
}

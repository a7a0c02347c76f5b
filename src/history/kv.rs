// src/history/kv.rs
//! String key-value backends for the history store: an in-memory map and a
//! single JSON file holding `{ key: value }`.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use crate::error::StoreError;

/// Minimal blob store keyed by string.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryKv {
    inner: Mutex<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let m = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(m.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut m = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        m.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut m = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        m.remove(key);
        Ok(())
    }
}

/// JSON-file backend. The whole map is rewritten on every change through a
/// temp file + rename, so readers never see a half-written file.
#[derive(Debug)]
pub struct FileKv {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKv {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<HashMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(s) if s.trim().is_empty() => Ok(HashMap::new()),
            Ok(s) => Ok(serde_json::from_str(&s)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Map to modify on a write. Corrupt JSON is replaced rather than blocking
    /// every future write; I/O failures are returned so other keys survive.
    fn read_map_for_write(&self) -> Result<HashMap<String, String>, StoreError> {
        match self.read_map() {
            Err(StoreError::Serde(e)) => {
                warn!(
                    error = %e,
                    path = %self.path.display(),
                    "store file is not valid JSON; replacing it"
                );
                Ok(HashMap::new())
            }
            other => other,
        }
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(map)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _g = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let _g = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut map = self.read_map_for_write()?;
        map.insert(key.to_string(), value);
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _g = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut map = self.read_map_for_write()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_kv_basic_ops() {
        let kv = MemoryKv::new();
        assert_eq!(kv.get("k").unwrap(), None);
        kv.set("k", "v".into()).unwrap();
        assert_eq!(kv.get("k").unwrap().as_deref(), Some("v"));
        kv.remove("k").unwrap();
        assert_eq!(kv.get("k").unwrap(), None);
    }

    #[test]
    fn file_kv_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let kv = FileKv::new(&path);
        assert_eq!(kv.get("a").unwrap(), None);
        kv.set("a", "[1,2]".into()).unwrap();
        kv.set("b", "x".into()).unwrap();

        let again = FileKv::new(&path);
        assert_eq!(again.get("a").unwrap().as_deref(), Some("[1,2]"));
        again.remove("a").unwrap();
        assert_eq!(kv.get("a").unwrap(), None);
        assert_eq!(kv.get("b").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn file_kv_corrupt_file_errors_on_read_and_heals_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();

        let kv = FileKv::new(&path);
        assert!(matches!(kv.get("a"), Err(StoreError::Serde(_))));
        kv.set("a", "1".into()).unwrap();
        assert_eq!(kv.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn file_kv_write_propagates_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        // a directory where the store file should be: reads fail with a non-NotFound error
        let path = dir.path().join("store.json");
        fs::create_dir_all(&path).unwrap();

        let kv = FileKv::new(&path);
        assert!(matches!(kv.get("a"), Err(StoreError::Io(_))));
        assert!(matches!(kv.set("a", "1".into()), Err(StoreError::Io(_))));
        assert!(matches!(kv.remove("a"), Err(StoreError::Io(_))));
        assert!(path.is_dir());
    }
}

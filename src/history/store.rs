// src/history/store.rs
use std::sync::{Mutex, MutexGuard};

use metrics::counter;
use tracing::{info, warn};

use super::{HistoryFilter, HistoryStore, KvStore};
use crate::config::app::{DEFAULT_HISTORY_CAPACITY, DEFAULT_HISTORY_KEY};
use crate::config::HistorySettings;
use crate::error::StoreError;
use crate::result::AnalysisResult;

/// History kept as one JSON array under `key`, newest first, at most `cap` long.
///
/// Writes are read-modify-write over the whole list; `write_lock` serializes
/// them so concurrent appends from shared handles never drop entries.
#[derive(Debug)]
pub struct KvHistoryStore<S: KvStore> {
    kv: S,
    key: String,
    cap: usize,
    write_lock: Mutex<()>,
}

impl<S: KvStore> KvHistoryStore<S> {
    pub fn new(kv: S) -> Self {
        Self::with_capacity(kv, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(kv: S, cap: usize) -> Self {
        Self {
            kv,
            key: DEFAULT_HISTORY_KEY.to_string(),
            cap: cap.max(1),
            write_lock: Mutex::new(()),
        }
    }

    pub fn from_settings(kv: S, settings: &HistorySettings) -> Self {
        Self {
            kv,
            key: settings.key.clone(),
            cap: settings.capacity.max(1),
            write_lock: Mutex::new(()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    fn lock_writes(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.write_lock.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Stored entries for a write path. A missing key or corrupt data is
    /// "no history" (the write replaces it); I/O and lock failures are returned
    /// so the caller never overwrites data it could not read.
    fn load_for_write(&self) -> Result<Vec<AnalysisResult>, StoreError> {
        let raw = match self.kv.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(Vec::new()),
            Err(StoreError::Serde(e)) => {
                warn!(error = %e, key = %self.key, "store is not valid JSON; replacing history");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        match serde_json::from_str::<Vec<AnalysisResult>>(&raw) {
            Ok(v) => Ok(v),
            Err(e) => {
                warn!(error = %e, key = %self.key, "history is not valid JSON; replacing it");
                Ok(Vec::new())
            }
        }
    }

    /// Read path: any failure is treated as "no history".
    fn load(&self) -> Vec<AnalysisResult> {
        let raw = match self.kv.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, key = %self.key, "history read failed; treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<AnalysisResult>>(&raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, key = %self.key, "history is not valid JSON; treating as empty");
                Vec::new()
            }
        }
    }

    fn save(&self, entries: &[AnalysisResult]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(entries)?;
        self.kv.set(&self.key, raw)?;
        counter!("cyberbully_history_writes_total").increment(1);
        Ok(())
    }
}

impl<S: KvStore> HistoryStore for KvHistoryStore<S> {
    fn append(&self, result: &AnalysisResult) -> Result<(), StoreError> {
        let _guard = self.lock_writes()?;
        let mut entries = self.load_for_write()?;
        entries.insert(0, result.clone());
        entries.truncate(self.cap);
        self.save(&entries)
    }

    fn list(&self, filter: &HistoryFilter) -> Vec<AnalysisResult> {
        self.load()
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect()
    }

    fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.lock_writes()?;
        self.kv.remove(&self.key)?;
        info!(key = %self.key, "history cleared");
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.lock_writes()?;
        let mut entries = self.load_for_write()?;
        let before = entries.len();
        entries.retain(|r| r.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.save(&entries)?;
        Ok(true)
    }
}

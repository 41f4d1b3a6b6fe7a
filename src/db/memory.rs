use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::db::KeyValueStore;
use crate::errors::{TrackerError, TrackerResult};

/// In-process store. Reads and writes can be made to fail so callers'
/// error handling can be exercised without a real backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
    fail_writes: AtomicBool,
    failing_reads: Mutex<HashSet<String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: Value) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value);
        }
        self
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The next read of `key` fails; later reads succeed again.
    pub fn fail_next_read(&self, key: &str) {
        if let Ok(mut keys) = self.failing_reads.lock() {
            keys.insert(key.to_string());
        }
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn raw(&self, key: &str) -> Option<Value> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> TrackerResult<Option<Value>> {
        let failing = self
            .failing_reads
            .lock()
            .map_err(|_| TrackerError::InternalError)?
            .remove(key);
        if failing {
            return Err(TrackerError::DbError(format!("read {key} rejected")));
        }
        let entries = self.entries.lock().map_err(|_| TrackerError::InternalError)?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> TrackerResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TrackerError::DbError(format!("write {key} rejected")));
        }
        let mut entries = self.entries.lock().map_err(|_| TrackerError::InternalError)?;
        entries.insert(key.to_string(), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

//! In-memory storage backend.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use kidscare_core::result::AppResult;

use super::DurableStorage;

/// A write that reached the backend, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageWrite {
    /// `set(key, _)`.
    Set(String),
    /// `remove(key)`.
    Remove(String),
}

#[derive(Debug, Default)]
struct Inner {
    entries: BTreeMap<String, String>,
    journal: Vec<StorageWrite>,
}

/// Volatile storage, used by tests and `--ephemeral` consoles.
///
/// Keeps a journal of writes so callers can check write ordering.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: Mutex<Inner>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given entries.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let storage = Self::new();
        {
            let mut inner = storage.lock();
            for (k, v) in entries {
                inner.entries.insert(k.to_string(), v.to_string());
            }
        }
        storage
    }

    /// Writes performed so far, oldest first.
    pub fn journal(&self) -> Vec<StorageWrite> {
        self.lock().journal.clone()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DurableStorage for MemoryStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.lock().entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut inner = self.lock();
        inner.entries.insert(key.to_string(), value.to_string());
        inner.journal.push(StorageWrite::Set(key.to_string()));
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut inner = self.lock();
        inner.entries.remove(key);
        inner.journal.push(StorageWrite::Remove(key.to_string()));
        Ok(())
    }
}

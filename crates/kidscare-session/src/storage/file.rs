//! JSON-file storage backend.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use kidscare_core::error::{AppError, ErrorKind};
use kidscare_core::result::AppResult;

use super::DurableStorage;

/// Storage persisted as one JSON object in a file.
///
/// The whole object is rewritten on every mutation through a temporary
/// sibling file and a rename, so a crash never leaves a half-written file.
#[derive(Debug)]
pub struct FileStorage {
    /// Path of the JSON file.
    path: PathBuf,
    /// Current contents, loaded once at open. Only replaced after the file
    /// has been written.
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open the storage file, creating its parent directory if needed.
    ///
    /// A missing file is an empty store. An unreadable or malformed file is
    /// also treated as empty (and replaced on the next write).
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create storage directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let entries = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<BTreeMap<String, String>>(&text) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Storage file is malformed, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Storage file is unreadable, starting empty");
                BTreeMap::new()
            }
        };

        debug!(path = %path.display(), keys = entries.len(), "Opened durable storage");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        let text = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write storage file: {}", tmp.display()),
                e,
            )
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace storage file: {}", self.path.display()),
                e,
            )
        })
    }
}

impl DurableStorage for FileStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self.lock();
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        *entries = next;
        debug!(key, "Stored key");
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self.lock();
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.flush(&next)?;
        *entries = next;
        debug!(key, "Removed key");
        Ok(())
    }
}

//! Key-Value store wrapper with automatic serialization.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

/// A string-valued key-value backend.
///
/// Writes are synchronous: once `set` returns `Ok`, the value is durable for
/// whatever durability the backend offers.
pub trait KvBackend: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Overwrite the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// List all keys in the store.
    fn keys(&self) -> Result<Vec<String>, CacheError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }
}

fn lock<'a>(
    entries: &'a Mutex<BTreeMap<String, String>>,
) -> Result<MutexGuard<'a, BTreeMap<String, String>>, CacheError> {
    entries
        .lock()
        .map_err(|_| CacheError::StoreError("store lock poisoned".to_string()))
}

fn footprint(entries: &BTreeMap<String, String>) -> usize {
    entries.iter().map(|(k, v)| k.len() + v.len()).sum()
}

/// Process-local backend, optionally bounded by a byte quota.
///
/// The quota counts key and value bytes, the way browser storage does.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<BTreeMap<String, String>>,
    capacity: Option<usize>,
}

impl MemoryBackend {
    /// Create an unbounded in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an in-memory backend that rejects writes beyond `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            capacity: Some(capacity),
        }
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = lock(&self.entries)?;
        if let Some(capacity) = self.capacity {
            let existing = entries.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let needed = footprint(&entries) - existing + key.len() + value.len();
            if needed > capacity {
                return Err(CacheError::QuotaExceeded { needed, capacity });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        lock(&self.entries)?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(lock(&self.entries)?.keys().cloned().collect())
    }
}

/// Backend persisted as a single JSON object on disk.
///
/// Every write rewrites the file through a temporary sibling and a rename, so
/// a crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileBackend {
    /// Open the store at `path`, creating parent directories as needed.
    ///
    /// A missing file starts an empty store. A file that is not a JSON object
    /// of strings is discarded with a warning and the store starts empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    CacheError::OpenError(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "discarding unreadable store file");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(CacheError::OpenError(format!("{}: {}", path.display(), e)));
            }
        };

        debug!(path = %path.display(), keys = entries.len(), "opened file store");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), CacheError> {
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KvBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = lock(&self.entries)?;
        let previous = entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush(&entries) {
            // Keep memory in step with what is on disk.
            match previous {
                Some(previous) => entries.insert(key.to_string(), previous),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = lock(&self.entries)?;
        if let Some(previous) = entries.remove(key) {
            if let Err(e) = self.flush(&entries) {
                entries.insert(key.to_string(), previous);
                return Err(e);
            }
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(lock(&self.entries)?.keys().cloned().collect())
    }
}

/// Type-safe cache over a [`KvBackend`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning shares the backend.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<dyn KvBackend>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

impl Cache {
    /// Wrap an existing backend.
    pub fn new(backend: impl KvBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Open an unbounded in-memory cache.
    ///
    /// # Example
    ///
    /// ```
    /// let cache = storefront_cache::Cache::in_memory();
    /// cache.set("greeting", &"hello").unwrap();
    /// assert_eq!(cache.get::<String>("greeting").unwrap().as_deref(), Some("hello"));
    /// ```
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Open a file-backed cache at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        Ok(Self::new(FileBackend::open(path)?))
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and an error if the stored
    /// value does not deserialize as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, &raw)
    }

    /// Get the raw string stored under `key`.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.backend.get(key)
    }

    /// Store a raw string under `key`.
    pub fn set_raw(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.backend.set(key, value)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.backend.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.backend.keys()
    }
}

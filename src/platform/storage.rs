//! String key/value storage
//!
//! Reads never fail from the caller's point of view: a missing or unreadable
//! value is simply absent. Writes report errors so callers can log them.

use std::collections::HashMap;
use std::fmt;

/// Why a write didn't stick
#[derive(Debug)]
pub enum StorageError {
    /// No storage backend is available (private browsing, no window)
    Unavailable,
    /// The backend rejected the write (quota, permissions)
    Rejected(String),
    Io(std::io::Error),
    Encode(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Rejected(reason) => write!(f, "write rejected: {reason}"),
            StorageError::Io(e) => write!(f, "io error: {e}"),
            StorageError::Encode(e) => write!(f, "encode error: {e}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Encode(e)
    }
}

/// Minimal persistent string map
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store (tests, and a fallback when nothing else is available)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, progress won't be saved");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected(format!("{e:?}")))
    }
}

/// JSON file holding a flat string map
#[cfg(not(target_arch = "wasm32"))]
pub struct FileStore {
    path: std::path::PathBuf,
    values: HashMap<String, String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Open (or lazily create) the store at `path`
    ///
    /// An unreadable or corrupt file starts the store empty.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring corrupt store {}: {e}", path.display());
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                log::warn!("Can't read store {}: {e}", path.display());
                HashMap::new()
            }
        };
        Self { path, values }
    }

    fn flush(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.values)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("sd_best"), None);
        store.set("sd_best", "42").expect("memory writes succeed");
        assert_eq!(store.get("sd_best").as_deref(), Some("42"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_survives_reopen() {
        let path = std::env::temp_dir().join(format!("space_dodge_store_{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let mut store = FileStore::open(&path);
        store.set("sd_best", "17").expect("temp dir is writable");

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("sd_best").as_deref(), Some("17"));

        let _ = std::fs::remove_file(&path);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_corrupt_file_starts_empty() {
        let path = std::env::temp_dir().join(format!("space_dodge_corrupt_{}.json", std::process::id()));
        std::fs::write(&path, "{ nope").expect("temp dir is writable");

        let store = FileStore::open(&path);
        assert_eq!(store.get("sd_best"), None);

        let _ = std::fs::remove_file(&path);
    }
}

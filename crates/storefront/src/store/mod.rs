//! The record store: flat namespaced key-value persistence.
//!
//! Each collection is a JSON-encoded array of records stored under its
//! name: `products`, `orders`, `users`. There is no schema enforcement, no
//! indexing, and no cross-collection transactions; a missing collection
//! reads as empty.
//!
//! The [`StorageBackend`] trait is the seam that lets tests substitute an
//! in-memory store for the file-backed one the binary uses.

pub mod orders;
pub mod products;
pub mod users;

pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Collection names used by the store.
pub mod collections {
    pub const PRODUCTS: &str = "products";
    pub const ORDERS: &str = "orders";
    pub const USERS: &str = "users";

    /// Every collection, for reset.
    pub const ALL: [&str; 3] = [PRODUCTS, ORDERS, USERS];
}

/// Errors from record store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A collection holds data that no longer parses as its record type.
    #[error("corrupt collection {collection}: {message}")]
    DataCorruption {
        collection: String,
        message: String,
    },

    /// The referenced record does not exist.
    #[error("record not found")]
    NotFound,

    /// The operation conflicts with an existing record or state.
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Raw string storage for JSON-encoded collections.
///
/// Implementations must tolerate reads of keys that were never written
/// (return `None`).
pub trait StorageBackend: Send + Sync {
    /// Read the raw value under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, std::io::Error>;

    /// Write the raw value under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), std::io::Error>;

    /// Remove the value under `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<(), std::io::Error>;
}

/// File-per-collection backend: each key is stored as `<key>.json` inside
/// the data directory.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: &Path) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, std::io::Error> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), std::io::Error> {
        std::fs::write(self.path_for(key), value)
    }

    fn remove(&self, key: &str) -> Result<(), std::io::Error> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// In-memory backend for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, String>>,
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, std::io::Error> {
        Ok(self.values.lock().map_or(None, |map| map.get(key).cloned()))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), std::io::Error> {
        if let Ok(mut map) = self.values.lock() {
            map.insert(key.to_owned(), value.to_owned());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), std::io::Error> {
        if let Ok(mut map) = self.values.lock() {
            map.remove(key);
        }
        Ok(())
    }
}

/// Typed access to the namespaced collections.
///
/// A single coarse lock serializes read-modify-write cycles; the store
/// models one user action at a time, so contention is not a concern.
pub struct Store {
    backend: Box<dyn StorageBackend>,
    lock: Mutex<()>,
}

impl Store {
    /// Open a file-backed store rooted at `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open(data_dir: &Path) -> Result<Self, std::io::Error> {
        Ok(Self::with_backend(Box::new(FileBackend::new(data_dir)?)))
    }

    /// Open an in-memory store (tests, ephemeral runs).
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_backend(Box::new(MemoryBackend::default()))
    }

    /// Wrap an arbitrary backend.
    #[must_use]
    pub fn with_backend(backend: Box<dyn StorageBackend>) -> Self {
        Self {
            backend,
            lock: Mutex::new(()),
        }
    }

    /// Read a whole collection. A missing collection is an empty one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails or
    /// `RepositoryError::DataCorruption` if the stored JSON does not parse.
    pub fn get_collection<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, RepositoryError> {
        self.decode(collection, self.backend.read(collection)?)
    }

    /// Replace a whole collection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    pub fn put_collection<T: Serialize>(
        &self,
        collection: &str,
        records: &[T],
    ) -> Result<(), RepositoryError> {
        let encoded = serde_json::to_string(records).map_err(|e| {
            RepositoryError::DataCorruption {
                collection: collection.to_owned(),
                message: e.to_string(),
            }
        })?;
        self.backend.write(collection, &encoded)?;
        Ok(())
    }

    /// Read-modify-write a collection under the store lock.
    ///
    /// The closure's return value is passed through on success.
    ///
    /// # Errors
    ///
    /// Propagates backend and decode errors; the collection is only written
    /// back if the closure succeeds.
    pub fn update_collection<T, R>(
        &self,
        collection: &str,
        f: impl FnOnce(&mut Vec<T>) -> Result<R, RepositoryError>,
    ) -> Result<R, RepositoryError>
    where
        T: Serialize + DeserializeOwned,
    {
        let _guard = self.lock.lock().map_err(|_| RepositoryError::Conflict(
            "store lock poisoned".to_owned(),
        ))?;

        let mut records: Vec<T> = self.decode(collection, self.backend.read(collection)?)?;
        let result = f(&mut records)?;
        self.put_collection(collection, &records)?;
        Ok(result)
    }

    /// Remove a collection entirely.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the backend fails.
    pub fn clear(&self, collection: &str) -> Result<(), RepositoryError> {
        self.backend.remove(collection)?;
        Ok(())
    }

    fn decode<T: DeserializeOwned>(
        &self,
        collection: &str,
        raw: Option<String>,
    ) -> Result<Vec<T>, RepositoryError> {
        match raw {
            Some(encoded) => {
                serde_json::from_str(&encoded).map_err(|e| RepositoryError::DataCorruption {
                    collection: collection.to_owned(),
                    message: e.to_string(),
                })
            }
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        id: String,
        value: i64,
    }

    fn record(id: &str, value: i64) -> Record {
        Record {
            id: id.to_owned(),
            value,
        }
    }

    #[test]
    fn test_missing_collection_reads_empty() {
        let store = Store::in_memory();
        let records: Vec<Record> = store.get_collection("missing").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_put_then_get_roundtrip() {
        let store = Store::in_memory();
        store
            .put_collection("things", &[record("1", 10), record("2", 20)])
            .unwrap();

        let records: Vec<Record> = store.get_collection("things").unwrap();
        assert_eq!(records, vec![record("1", 10), record("2", 20)]);
    }

    #[test]
    fn test_update_collection_applies_closure() {
        let store = Store::in_memory();
        store.put_collection("things", &[record("1", 10)]).unwrap();

        let seen = store
            .update_collection("things", |records: &mut Vec<Record>| {
                records.push(record("2", 20));
                Ok(records.len())
            })
            .unwrap();

        assert_eq!(seen, 2);
        let records: Vec<Record> = store.get_collection("things").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_update_collection_error_leaves_collection_untouched() {
        let store = Store::in_memory();
        store.put_collection("things", &[record("1", 10)]).unwrap();

        let result = store.update_collection("things", |records: &mut Vec<Record>| {
            records.clear();
            Err::<(), _>(RepositoryError::NotFound)
        });
        assert!(result.is_err());

        let records: Vec<Record> = store.get_collection("things").unwrap();
        assert_eq!(records, vec![record("1", 10)]);
    }

    #[test]
    fn test_clear_removes_collection() {
        let store = Store::in_memory();
        store.put_collection("things", &[record("1", 10)]).unwrap();
        store.clear("things").unwrap();

        let records: Vec<Record> = store.get_collection("things").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_corrupt_collection_is_reported() {
        let backend = MemoryBackend::default();
        backend.write("things", "not json").unwrap();
        let store = Store::with_backend(Box::new(backend));

        let result: Result<Vec<Record>, _> = store.get_collection("things");
        assert!(matches!(
            result,
            Err(RepositoryError::DataCorruption { .. })
        ));
    }

    #[test]
    fn test_file_backend_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = Store::open(dir.path()).unwrap();
            store.put_collection("things", &[record("1", 10)]).unwrap();
        }

        let store = Store::open(dir.path()).unwrap();
        let records: Vec<Record> = store.get_collection("things").unwrap();
        assert_eq!(records, vec![record("1", 10)]);
    }
}

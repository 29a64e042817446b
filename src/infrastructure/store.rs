//! Persistent key-value storage
//!
//! The store is one JSON object mapping string keys to string values.
//! Reads see a consistent snapshot. Writes go through [`KeyValueStore::update`],
//! which runs the mutation as a single transaction: one writer at a time,
//! and the new document replaces the old one atomically.

use crate::error::{Result, WeightlogError};
use std::cell::RefCell;
use std::collections::BTreeMap;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Snapshot of every key in a store
pub type StoreDocument = BTreeMap<String, String>;

const LOCK_RETRIES: u32 = 50;
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(20);

/// Abstract key-value storage
pub trait KeyValueStore {
    /// Read the whole document
    fn load(&self) -> Result<StoreDocument>;

    /// Read-modify-write under exclusive access. Nothing is written when
    /// `apply` returns an error.
    fn update<T, F>(&self, apply: F) -> Result<T>
    where
        F: FnOnce(&mut StoreDocument) -> Result<T>;

    /// Read a single key
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }
}

/// JSON file store with a lock file guarding writers
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        let lock_path = path.with_extension("lock");
        FileStore { path, lock_path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<StoreDocument> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoreDocument::new()),
            Err(e) => return Err(WeightlogError::Io(e)),
        };

        if contents.trim().is_empty() {
            return Ok(StoreDocument::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            WeightlogError::StorageRead(format!("{}: {}", self.path.display(), e))
        })
    }

    /// Write to a temp file in the same directory, then rename into place.
    fn write_document(&self, document: &StoreDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self
            .path
            .with_extension(format!("json.tmp-{}", std::process::id()));
        let contents = serde_json::to_string_pretty(document)?;
        let written = fs::write(&tmp_path, contents).and_then(|()| {
            // rename does not replace an existing file on Windows
            if cfg!(windows) && self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            fs::rename(&tmp_path, &self.path)
        });

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(WeightlogError::Io(e));
        }
        Ok(())
    }

    /// Take the OS-level exclusive lock on `store.lock`. It is held until
    /// the returned file is closed or the process exits.
    fn acquire_lock(&self) -> Result<File> {
        if let Some(parent) = self.lock_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)?;

        for attempt in 0..LOCK_RETRIES {
            match lock_file.try_lock_exclusive() {
                Ok(()) => return Ok(lock_file),
                Err(e) if is_contended(&e) => {
                    debug!(attempt, lock = %self.lock_path.display(), "store locked, retrying");
                    thread::sleep(LOCK_RETRY_DELAY);
                }
                Err(e) => return Err(WeightlogError::Io(e)),
            }
        }
        Err(WeightlogError::StoreBusy(self.lock_path.clone()))
    }
}

fn is_contended(error: &io::Error) -> bool {
    error.kind() == ErrorKind::WouldBlock
        || error.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

impl KeyValueStore for FileStore {
    fn load(&self) -> Result<StoreDocument> {
        self.read_document()
    }

    fn update<T, F>(&self, apply: F) -> Result<T>
    where
        F: FnOnce(&mut StoreDocument) -> Result<T>,
    {
        let _lock = self.acquire_lock()?;
        let mut document = self.read_document()?;
        let result = apply(&mut document)?;
        self.write_document(&document)?;
        debug!(path = %self.path.display(), keys = document.len(), "store updated");
        Ok(result)
    }
}

/// In-process store with the same transaction semantics
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RefCell<StoreDocument>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self) -> Result<StoreDocument> {
        Ok(self.document.borrow().clone())
    }

    fn update<T, F>(&self, apply: F) -> Result<T>
    where
        F: FnOnce(&mut StoreDocument) -> Result<T>,
    {
        let mut working = self.document.borrow().clone();
        let result = apply(&mut working)?;
        *self.document.borrow_mut() = working;
        Ok(result)
    }
}

impl<S: KeyValueStore> KeyValueStore for &S {
    fn load(&self) -> Result<StoreDocument> {
        (**self).load()
    }

    fn update<T, F>(&self, apply: F) -> Result<T>
    where
        F: FnOnce(&mut StoreDocument) -> Result<T>,
    {
        (**self).update(apply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_store(temp: &TempDir) -> FileStore {
        FileStore::new(temp.path().join(".weightlog").join("store.json"))
    }

    fn temp_files(temp: &TempDir) -> Vec<String> {
        fs::read_dir(temp.path().join(".weightlog"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.contains(".tmp-"))
            .collect()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = file_store(&temp);
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_update_persists() {
        let temp = TempDir::new().unwrap();
        let store = file_store(&temp);

        store
            .update(|doc| {
                doc.insert("weight_2025-01-17".to_string(), "70.5".to_string());
                Ok(())
            })
            .unwrap();

        let reopened = file_store(&temp);
        assert_eq!(
            reopened.get("weight_2025-01-17").unwrap(),
            Some("70.5".to_string())
        );
        assert_eq!(temp_files(&temp), Vec::<String>::new());
    }

    #[test]
    fn test_failed_update_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let store = file_store(&temp);

        let result: Result<()> = store.update(|doc| {
            doc.insert("k".to_string(), "v".to_string());
            Err(WeightlogError::Config("abort".to_string()))
        });

        assert!(result.is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_storage_read_error() {
        let temp = TempDir::new().unwrap();
        let store = file_store(&temp);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(
            store.load(),
            Err(WeightlogError::StorageRead(_))
        ));
        // A corrupt store is never overwritten by a transaction
        let result = store.update(|doc| {
            doc.clear();
            Ok(())
        });
        assert!(matches!(result, Err(WeightlogError::StorageRead(_))));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{not json");
    }

    #[test]
    fn test_held_lock_reports_busy() {
        let temp = TempDir::new().unwrap();
        let store = file_store(&temp);
        let holder = store.acquire_lock().unwrap();

        let result = store.update(|_| Ok(()));
        assert!(matches!(result, Err(WeightlogError::StoreBusy(_))));

        drop(holder);
        assert!(store.update(|_| Ok(())).is_ok());
    }

    #[test]
    fn test_leftover_lock_file_does_not_block_writes() {
        let temp = TempDir::new().unwrap();
        let store = file_store(&temp);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(&store.lock_path, "").unwrap();

        store
            .update(|doc| {
                doc.insert("k".to_string(), "v".to_string());
                Ok(())
            })
            .unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let temp = TempDir::new().unwrap();
        let store = file_store(&temp);
        // A directory at the target path makes the rename fail
        fs::create_dir_all(store.path()).unwrap();
        fs::write(store.path().join("keep"), "").unwrap();

        let result = store.write_document(&StoreDocument::new());
        assert!(matches!(result, Err(WeightlogError::Io(_))));
        assert_eq!(temp_files(&temp), Vec::<String>::new());
    }

    #[test]
    fn test_memory_store_rolls_back_on_error() {
        let store = MemoryStore::new();
        store
            .update(|doc| {
                doc.insert("a".to_string(), "1".to_string());
                Ok(())
            })
            .unwrap();

        let _ = store.update(|doc| -> Result<()> {
            doc.insert("b".to_string(), "2".to_string());
            Err(WeightlogError::Config("abort".to_string()))
        });

        let doc = store.load().unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("a"), Some(&"1".to_string()));
    }
}

//! Atomic JSON file operations.
//!
//! A thin layer for safe whole-document access to the JSON files backing
//! the store's collections.
//!
//! - **Atomicity**: updates are all-or-nothing via tmp file + atomic rename
//! - **Isolation**: an advisory file lock guards the read-modify-write
//!   window (single-writer assumption; no compare-and-swap)
//! - **Durability**: explicit fsync before rename

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use rostra_core::error::{Result, RostraError};

/// A handle to one collection's JSON document.
///
/// The collection name travels with the handle so parse failures can be
/// reported against it instead of being swallowed as an empty collection.
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    collection: &'static str,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a handle for `collection` stored at `path`.
    pub fn new(path: PathBuf, collection: &'static str) -> Self {
        Self {
            path,
            collection,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the document.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: successfully loaded and parsed
    /// - `Ok(None)`: file doesn't exist or is empty
    /// - `Err(CorruptData)`: the file exists but cannot be parsed
    /// - `Err(Storage)`: the medium failed
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = serde_json::from_str(&content)
            .map_err(|e| RostraError::corrupt_data(self.collection, e.to_string()))?;
        Ok(Some(data))
    }

    /// Replaces the document atomically.
    ///
    /// Serializes, writes to a sibling temp file, fsyncs, then renames
    /// over the target. An advisory lock is held for the duration.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let _lock = FileLock::acquire(&self.path)?;

        let json = serde_json::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| RostraError::storage("path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| RostraError::storage("path has no file name"))?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| RostraError::storage(format!("failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the file handle is dropped; removing
        // the lock file is best effort.
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Vec<Record>>::new(temp_dir.path().join("records.json"), "records");

        let records = vec![Record {
            name: "first".to_string(),
            count: 42,
        }];
        file.save(&records).unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file =
            AtomicJsonFile::<Vec<Record>>::new(temp_dir.path().join("missing.json"), "records");

        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.json");
        std::fs::write(&path, "  \n").unwrap();

        let file = AtomicJsonFile::<Vec<Record>>::new(path, "records");
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_reported_not_swallowed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.json");
        std::fs::write(&path, "{not json").unwrap();

        let file = AtomicJsonFile::<Vec<Record>>::new(path, "records");
        let err = file.load().unwrap_err();
        match err {
            RostraError::CorruptData { collection, .. } => assert_eq!(collection, "records"),
            other => panic!("expected CorruptData, got {:?}", other),
        }
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.json");
        let file = AtomicJsonFile::<Vec<Record>>::new(path.clone(), "records");

        file.save(&vec![Record {
            name: "only".to_string(),
            count: 1,
        }])
        .unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join(".records.json.tmp").exists());
    }
}

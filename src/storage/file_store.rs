// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Plain filesystem operations backing the record store.
//!
//! Every record is one JSON document. Writes go to a uniquely named temp file
//! next to the target and are renamed into place, so readers observe either the
//! old or the new document, never a torn one.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use super::StoragePaths;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(io::Error),
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),
    /// Storage not initialized
    #[error("Storage not initialized")]
    NotInitialized,
    /// Stored document does not match what was asked for
    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::NotFound {
            StorageError::NotFound(e.to_string())
        } else {
            StorageError::Io(e)
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// File-backed storage rooted at a [`StoragePaths`] layout.
#[derive(Debug, Clone)]
pub struct FileStorage {
    paths: StoragePaths,
    initialized: bool,
}

impl FileStorage {
    /// Create a new FileStorage instance.
    ///
    /// Does NOT create the directory structure. Call `initialize()` first.
    pub fn new(paths: StoragePaths) -> Self {
        Self {
            paths,
            initialized: false,
        }
    }

    /// Get the storage paths.
    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    /// Create the directory structure. Safe to call multiple times.
    pub fn initialize(&mut self) -> StorageResult<()> {
        fs::create_dir_all(self.paths.records_dir())?;
        self.initialized = true;
        Ok(())
    }

    /// Write-read-delete probe verifying the data directory is usable.
    pub fn health_check(&self) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        // Unique per probe so concurrent checks never remove each other's file.
        let test_file = self
            .paths
            .records_dir()
            .join(format!(".health_check.{}", uuid::Uuid::new_v4().simple()));
        let test_data = b"health_check_data";

        fs::write(&test_file, test_data)?;
        let read_data = fs::read(&test_file)?;
        fs::remove_file(&test_file)?;

        if read_data != test_data {
            return Err(StorageError::IntegrityViolation(
                "Health check data mismatch".to_string(),
            ));
        }

        Ok(())
    }

    /// Read a JSON file and deserialize it.
    pub fn read_json<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> StorageResult<T> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let value = serde_json::from_reader(reader)?;
        Ok(value)
    }

    /// Write a JSON file, replacing any previous content atomically.
    pub fn write_json<T: Serialize>(&self, path: impl AsRef<Path>, value: &T) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Unique per write so concurrent writers never share a temp file.
        let temp_path = path.with_extension(format!("{}.tmp", uuid::Uuid::new_v4().simple()));
        let written = (|| -> StorageResult<()> {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
            Ok(())
        })();

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        fs::rename(&temp_path, path).inspect_err(|_| {
            let _ = fs::remove_file(&temp_path);
        })?;
        Ok(())
    }

    /// Check whether a regular file exists at `path`.
    ///
    /// A missing file is `Ok(false)`; any other failure is reported.
    pub fn exists(&self, path: impl AsRef<Path>) -> StorageResult<bool> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        match fs::metadata(path.as_ref()) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStorage) {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(StoragePaths::new(temp.path()));
        storage.initialize().expect("Failed to initialize test storage");
        (temp, storage)
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        id: String,
        value: i32,
    }

    #[test]
    fn initialize_creates_directories() {
        let (_temp, storage) = setup();
        assert!(storage.paths().records_dir().is_dir());
    }

    #[test]
    fn write_and_read_json() {
        let (_temp, storage) = setup();
        let data = TestData {
            id: "test-1".to_string(),
            value: 42,
        };

        let path = storage.paths().records_dir().join("test.json");
        storage.write_json(&path, &data).unwrap();

        let read: TestData = storage.read_json(&path).unwrap();
        assert_eq!(read, data);
    }

    #[test]
    fn overwrite_leaves_no_temp_files() {
        let (_temp, storage) = setup();
        let path = storage.paths().records_dir().join("test.json");

        for value in 0..3 {
            storage
                .write_json(&path, &TestData {
                    id: "same".to_string(),
                    value,
                })
                .unwrap();
        }

        let read: TestData = storage.read_json(&path).unwrap();
        assert_eq!(read.value, 2);

        let entries: Vec<_> = fs::read_dir(storage.paths().records_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("test.json")]);
    }

    #[test]
    fn exists_reports_missing_files_as_false() {
        let (_temp, storage) = setup();
        let path = storage.paths().records_dir().join("nope.json");
        assert!(!storage.exists(&path).unwrap());

        storage
            .write_json(&path, &TestData {
                id: "x".to_string(),
                value: 1,
            })
            .unwrap();
        assert!(storage.exists(&path).unwrap());
    }

    #[test]
    fn exists_ignores_directories() {
        let (_temp, storage) = setup();
        assert!(!storage.exists(storage.paths().records_dir()).unwrap());
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let (_temp, storage) = setup();
        let result = storage.read_json::<TestData>(storage.paths().records_dir().join("gone.json"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn read_corrupt_file_is_json_error() {
        let (_temp, storage) = setup();
        let path = storage.paths().records_dir().join("bad.json");
        fs::write(&path, b"{ not json").unwrap();

        let result = storage.read_json::<TestData>(&path);
        assert!(matches!(result, Err(StorageError::Json(_))));
    }

    #[test]
    fn health_check_works() {
        let (_temp, storage) = setup();
        storage.health_check().expect("Health check should pass");
    }

    #[test]
    fn concurrent_health_checks_all_pass() {
        let (_temp, storage) = setup();

        let failures: usize = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        (0..50)
                            .filter(|_| storage.health_check().is_err())
                            .count()
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).sum()
        });

        assert_eq!(failures, 0);
        let leftovers = fs::read_dir(storage.paths().records_dir()).unwrap().count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn uninitialized_storage_returns_error() {
        let storage = FileStorage::new(StoragePaths::new("/tmp/never-init"));

        let result = storage.read_json::<TestData>("/tmp/any.json");
        assert!(matches!(result, Err(StorageError::NotInitialized)));
        assert!(matches!(
            storage.health_check(),
            Err(StorageError::NotInitialized)
        ));
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Record repository.
//!
//! One JSON file per record under `{DATA_DIR}/records/`, named by
//! [`record_key`](super::paths::record_key) of the identifier.

use super::{FileStorage, StorageError, StorageResult};
use crate::models::Record;

/// Typed access to records in file storage.
pub struct RecordRepository<'a> {
    storage: &'a FileStorage,
}

impl<'a> RecordRepository<'a> {
    pub fn new(storage: &'a FileStorage) -> Self {
        Self { storage }
    }

    /// Whether a record exists for `id`.
    ///
    /// Never fails: storage errors are logged and reported as absent.
    pub fn has(&self, id: &str) -> bool {
        match self.storage.exists(self.storage.paths().record(id)) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(record_id = %id, error = %e, "Existence check failed, treating as absent");
                false
            }
        }
    }

    /// Load the record for `id`.
    pub fn get(&self, id: &str) -> StorageResult<Record> {
        let path = self.storage.paths().record(id);
        let record: Record = self.storage.read_json(path).map_err(|e| match e {
            StorageError::NotFound(_) => StorageError::NotFound(format!("Record {id}")),
            other => other,
        })?;

        // Keys are digests; a mismatch means the file was put there by hand.
        if record.id.as_str() != id {
            return Err(StorageError::IntegrityViolation(format!(
                "file for record {id} holds record {}",
                record.id
            )));
        }

        Ok(record)
    }

    /// Load the record for `id`, mapping absence to `None`.
    pub fn find(&self, id: &str) -> StorageResult<Option<Record>> {
        match self.get(id) {
            Ok(record) => Ok(Some(record)),
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Write or overwrite the record under its own identifier.
    ///
    /// Callers deciding whether the write is allowed must hold the identifier's
    /// lock from [`IdLocks`](super::IdLocks) across the check and this call.
    pub fn save(&self, record: &Record) -> StorageResult<()> {
        self.storage
            .write_json(self.storage.paths().record(record.id.as_str()), record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecordId, RecordKind};
    use crate::storage::StoragePaths;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStorage) {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(StoragePaths::new(temp.path()));
        storage.initialize().expect("Failed to initialize");
        (temp, storage)
    }

    fn note(id: &str, content: &str) -> Record {
        Record::new(RecordId::parse(id).unwrap(), RecordKind::Note, content)
    }

    #[test]
    fn missing_record_is_absent_and_not_found() {
        let (_temp, storage) = setup();
        let repo = RecordRepository::new(&storage);

        assert!(!repo.has("ghost"));
        assert!(matches!(repo.get("ghost"), Err(StorageError::NotFound(_))));
        assert!(repo.find("ghost").unwrap().is_none());
    }

    #[test]
    fn save_then_get_round_trips() {
        let (_temp, storage) = setup();
        let repo = RecordRepository::new(&storage);

        let mut record = Record::new(
            RecordId::parse("bar").unwrap(),
            RecordKind::Uri,
            "https://example.com",
        );
        record.password_hash = Some("$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA".into());
        repo.save(&record).unwrap();

        assert!(repo.has("bar"));
        let loaded = repo.get("bar").unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn save_overwrites_in_place() {
        let (_temp, storage) = setup();
        let repo = RecordRepository::new(&storage);

        repo.save(&note("foo", "first")).unwrap();
        repo.save(&note("foo", "second")).unwrap();

        assert_eq!(repo.get("foo").unwrap().content, "second");
        let files = fs::read_dir(storage.paths().records_dir()).unwrap().count();
        assert_eq!(files, 1);
    }

    #[test]
    fn ids_differing_only_in_case_are_separate_records() {
        let (_temp, storage) = setup();
        let repo = RecordRepository::new(&storage);

        repo.save(&note("foo", "lower")).unwrap();
        repo.save(&note("FOO", "upper")).unwrap();

        assert_eq!(repo.get("foo").unwrap().content, "lower");
        assert_eq!(repo.get("FOO").unwrap().content, "upper");
    }

    #[test]
    fn corrupt_file_is_an_error_not_a_missing_record() {
        let (_temp, storage) = setup();
        let repo = RecordRepository::new(&storage);

        fs::write(storage.paths().record("broken"), b"{").unwrap();

        assert!(repo.has("broken"));
        assert!(matches!(repo.get("broken"), Err(StorageError::Json(_))));
        assert!(matches!(repo.find("broken"), Err(StorageError::Json(_))));
    }

    #[test]
    fn misplaced_file_is_an_integrity_violation() {
        let (_temp, storage) = setup();
        let repo = RecordRepository::new(&storage);

        repo.save(&note("real", "content")).unwrap();
        fs::copy(storage.paths().record("real"), storage.paths().record("fake")).unwrap();

        assert!(matches!(
            repo.get("fake"),
            Err(StorageError::IntegrityViolation(_))
        ));
    }

    #[test]
    fn has_swallows_storage_errors() {
        let storage = FileStorage::new(StoragePaths::new("/tmp/never-init"));
        let repo = RecordRepository::new(&storage);
        assert!(!repo.has("anything"));
    }
}

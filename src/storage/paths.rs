// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path constants and utilities for the record store layout.

use std::path::{Path, PathBuf};

use base64ct::{Base64UrlUnpadded, Encoding};
use sha2::{Digest, Sha256};

/// Default base directory for persisted records.
pub const DATA_ROOT: &str = "db";

/// Storage path utilities for the record store.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl StoragePaths {
    /// Layout rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Directory containing all records.
    pub fn records_dir(&self) -> PathBuf {
        self.root.join("records")
    }

    /// Path to the file backing the record `id`.
    ///
    /// The file name is derived from a digest of the identifier, so any
    /// identifier maps to exactly one file directly under [`Self::records_dir`].
    pub fn record(&self, id: &str) -> PathBuf {
        self.records_dir().join(format!("{}.json", record_key(id)))
    }
}

/// File-name-safe key for a record identifier.
///
/// URL-safe unpadded base64 of the SHA-256 digest: 43 characters drawn from
/// `[A-Za-z0-9_-]`.
pub fn record_key(id: &str) -> String {
    let digest = Sha256::digest(id.as_bytes());
    Base64UrlUnpadded::encode_string(&digest)
}

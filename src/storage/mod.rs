// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Record Storage Module
//!
//! Persists records as one JSON file each under the configured data directory.
//!
//! ## Storage Layout
//!
//! ```text
//! {DATA_DIR}/
//!   records/
//!     {key}.json     # key = base64url(sha256(id)), no padding
//! ```
//!
//! ## Concurrency
//!
//! File writes are atomic renames. The check-then-write sequence of an edit is
//! serialized per identifier through [`IdLocks`].

pub mod file_store;
pub mod locks;
pub mod paths;
pub mod repository;

pub use file_store::{FileStorage, StorageError, StorageResult};
pub use locks::{IdGuard, IdLocks};
pub use paths::StoragePaths;
pub use repository::RecordRepository;

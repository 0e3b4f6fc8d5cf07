// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    hasher::PasswordHasher,
    render::Pages,
    storage::{FileStorage, IdLocks, RecordRepository},
};

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<FileStorage>,
    pub locks: Arc<IdLocks>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub pages: Arc<Pages>,
}

impl AppState {
    pub fn new(storage: FileStorage, hasher: Arc<dyn PasswordHasher>, pages: Pages) -> Self {
        Self {
            storage: Arc::new(storage),
            locks: Arc::new(IdLocks::new()),
            hasher,
            pages: Arc::new(pages),
        }
    }

    pub fn records(&self) -> RecordRepository<'_> {
        RecordRepository::new(&self.storage)
    }
}

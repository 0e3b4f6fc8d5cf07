// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-identifier mutual exclusion for record writes.
//!
//! The edit check (exists? locked? password?) and the following write must not
//! interleave with another writer for the same identifier. Each identifier that
//! currently has a writer gets its own async mutex; writers for different
//! identifiers never wait on each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Guard held for the duration of a read-check-write sequence.
pub type IdGuard = OwnedMutexGuard<()>;

/// Table of per-identifier locks.
#[derive(Debug, Default)]
pub struct IdLocks {
    slots: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl IdLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `id`.
    pub async fn lock(&self, id: &str) -> IdGuard {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            // Slots nobody holds or waits on only have the table's reference left.
            slots.retain(|_, slot| Arc::strong_count(slot) > 1);
            Arc::clone(slots.entry(id.to_string()).or_default())
        };
        slot.lock_owned().await
    }

    /// Number of identifiers with a live slot.
    #[cfg(test)]
    fn active(&self) -> usize {
        self.slots
            .lock()
            .map(|slots| {
                slots
                    .values()
                    .filter(|slot| Arc::strong_count(slot) > 1)
                    .count()
            })
            .unwrap_or(0)
    }
}

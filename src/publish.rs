// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Record Publishing
//!
//! Creating and editing records share one entry point, [`publish`].
//!
//! ## Edit Authorization
//!
//! 1. No record under the identifier: the write is allowed.
//! 2. An unlocked record: the write is allowed, whatever password is given.
//! 3. A locked record: the write is allowed only with the matching password.
//!
//! The check and the write run while holding the identifier's lock, so two
//! submissions for the same identifier cannot both pass the check against the
//! same old state.

use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    error::ApiError,
    hasher::HashError,
    models::{IdError, NewRecordForm, Record, RecordId, ValidationError},
    state::AppState,
    storage::StorageError,
};

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error(transparent)]
    InvalidId(#[from] IdError),
    #[error("This record is invalid.")]
    Invalid(#[from] ValidationError),
    #[error("This record will create a redirect loop.")]
    RedirectLoop,
    #[error("Incorrect password: could not edit record {0}.")]
    Unauthorized(RecordId),
    #[error(transparent)]
    Hash(#[from] HashError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("password task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<PublishError> for ApiError {
    fn from(err: PublishError) -> Self {
        match err {
            PublishError::InvalidId(_) | PublishError::Invalid(_) => {
                ApiError::bad_request(err.to_string())
            }
            PublishError::RedirectLoop => ApiError::conflict(err.to_string()),
            PublishError::Unauthorized(_) => ApiError::unauthorized(err.to_string()),
            PublishError::Hash(_) | PublishError::Storage(_) | PublishError::Join(_) => {
                ApiError::internal(err)
            }
        }
    }
}

/// Create or edit the record described by `form`.
pub async fn publish(state: &AppState, form: NewRecordForm) -> Result<Record, PublishError> {
    let id = RecordId::parse(&form.id)?;
    let _guard = state.locks.lock(id.as_str()).await;
    let records = state.records();

    // A record that exists but cannot be read must not be treated as absent,
    // or its lock could be bypassed.
    let existing = records.find(id.as_str())?;

    if let Some(existing) = existing.as_ref().filter(|r| r.is_locked()) {
        let hasher = Arc::clone(&state.hasher);
        let locked = existing.clone();
        let presented = form.password.clone();
        let unlocked = tokio::task::spawn_blocking(move || {
            locked.can_unlock_with(hasher.as_ref(), &presented)
        })
        .await?;

        if !unlocked {
            warn!(record_id = %id, "Unauthorized attempt to edit record");
            return Err(PublishError::Unauthorized(id));
        }
    }

    let (kind, content) = form.kind_and_content();
    let mut record = Record::new(id, kind, content);
    if let Some(existing) = &existing {
        record.created_at = existing.created_at;
    }

    if record.is_redirect_loop() {
        return Err(PublishError::RedirectLoop);
    }
    record.validate().inspect_err(|e| {
        warn!(record_id = %record.id, reason = %e, "Rejected invalid record");
    })?;

    if let Some(password) = form.password() {
        let hasher = Arc::clone(&state.hasher);
        let password = password.to_string();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;
        record.password_hash = Some(hash);
    }

    records.save(&record)?;
    info!(
        record_id = %record.id,
        kind = record.kind.as_str(),
        locked = record.is_locked(),
        edit = existing.is_some(),
        "Saved record"
    );
    Ok(record)
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Fail-open policy for read-only status endpoints.
//!
//! `/{id}/content` and `/{id}/locked` feed the creation form's hints. They
//! answer with a neutral value instead of an error when storage misbehaves.
//! Every degradation goes through [`fail_open`] and is logged.

use std::fmt::Display;

/// Return the value in `result`, or log the error and return `fallback()`.
pub fn fail_open<T, E: Display>(
    endpoint: &'static str,
    record_id: &str,
    result: Result<T, E>,
    fallback: impl FnOnce() -> T,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                endpoint,
                record_id = %record_id,
                error = %e,
                "Storage error on read-only endpoint, answering with fallback"
            );
            fallback()
        }
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Zone - Note and Link Sharing Service
//!
//! Publishes short text notes and redirect links under user-chosen
//! identifiers, optionally locked against edits by a password.
//!
//! ## Modules
//!
//! - `api` - HTTP handlers and router (Axum)
//! - `publish` - Create and edit flow with password checks
//! - `storage` - One JSON file per record, atomic writes, per-record locks
//! - `render` - HTML page template and escaping
//! - `hasher` - Argon2id password hashing

pub mod api;
pub mod config;
pub mod error;
pub mod hasher;
pub mod logging;
pub mod models;
pub mod publish;
pub mod render;
pub mod shutdown;
pub mod state;
pub mod storage;
pub mod tls;

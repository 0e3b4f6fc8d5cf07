// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::render::{Pages, Template};

/// Message shown for failures whose details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Log `detail` and hide it from the client.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }

    /// The standard "record does not exist" failure.
    pub fn record_not_found(id: &str) -> Self {
        Self::not_found(format!("Record {id} does not exist."))
    }

    /// Render as an HTML error page through `template`.
    pub fn into_page(self, template: &Template) -> Response {
        (
            self.status,
            [(header::CACHE_CONTROL, "no-store")],
            Html(template.error_page(&self.message)),
        )
            .into_response()
    }

    /// Pair with the pages the error is rendered through.
    pub fn with_pages(self, pages: &Arc<Pages>) -> PageError {
        PageError {
            error: self,
            pages: Arc::clone(pages),
        }
    }
}

/// An [`ApiError`] that renders as the site's HTML error page.
#[derive(Debug)]
pub struct PageError {
    pub error: ApiError,
    pages: Arc<Pages>,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        self.error.into_page(&self.pages.template)
    }
}

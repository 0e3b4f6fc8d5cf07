// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use tracing::info;
use url::form_urlencoded::byte_serialize;

use super::fail_open::fail_open;
use crate::{
    error::{ApiError, PageError},
    models::{NewRecordForm, Record, RecordContent},
    publish::publish,
    state::AppState,
    storage::StorageError,
};

type PageResult<T = Response> = Result<T, PageError>;

/// `302 Found` to `location`; `Redirect::to` answers 303.
fn found(state: &AppState, location: &str) -> PageResult {
    let value = HeaderValue::from_str(location).map_err(|e| {
        ApiError::internal(format!("unusable redirect target {location:?}: {e}"))
            .with_pages(&state.pages)
    })?;
    Ok((StatusCode::FOUND, [(header::LOCATION, value)]).into_response())
}

/// Percent-encode `segment` for use as one URL path segment.
///
/// Identifiers never hold whitespace, so the form encoding's `+` for space
/// cannot appear.
pub fn encode_path_segment(segment: &str) -> String {
    byte_serialize(segment.as_bytes()).collect()
}

fn load(state: &AppState, id: &str) -> PageResult<Record> {
    state.records().get(id).map_err(|e| {
        let error = match e {
            StorageError::NotFound(_) => ApiError::record_not_found(id),
            other => ApiError::internal(other),
        };
        error.with_pages(&state.pages)
    })
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Records",
    responses((status = 200, description = "Creation and edit form", content_type = "text/html"))
)]
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.pages.index.clone())
}

#[utoipa::path(
    post,
    path = "/new",
    request_body(content = NewRecordForm, content_type = "application/x-www-form-urlencoded"),
    tag = "Records",
    responses(
        (status = 302, description = "Saved; redirects to the record"),
        (status = 400, description = "Invalid identifier or record", content_type = "text/html"),
        (status = 401, description = "Record is locked and the password does not match", content_type = "text/html"),
        (status = 409, description = "Redirect target equals the record's own identifier", content_type = "text/html"),
        (status = 500, description = "Unexpected failure", content_type = "text/html")
    )
)]
pub async fn create_record(
    State(state): State<AppState>,
    Form(form): Form<NewRecordForm>,
) -> PageResult {
    let record = publish(&state, form)
        .await
        .map_err(|e| ApiError::from(e).with_pages(&state.pages))?;
    found(&state, &format!("/{}", encode_path_segment(record.id.as_str())))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    tag = "Records",
    responses(
        (status = 200, description = "Note rendered as a page", content_type = "text/html"),
        (status = 302, description = "Redirect to the record's target URL"),
        (status = 404, description = "No such record", content_type = "text/html")
    )
)]
pub async fn view_record(State(state): State<AppState>, Path(id): Path<String>) -> PageResult {
    let record = load(&state, &id)?;

    if record.is_uri() {
        let target = record.redirect_target().ok_or_else(|| {
            ApiError::internal(format!("record {id} holds an unparsable target"))
                .with_pages(&state.pages)
        })?;
        info!(record_id = %record.id, target = %target, "Redirected record");
        return found(&state, &target);
    }

    info!(record_id = %record.id, "Rendered note as HTML");
    Ok(Html(state.pages.template.note_page(&record)).into_response())
}

#[utoipa::path(
    get,
    path = "/{id}/raw",
    params(("id" = String, Path, description = "Record identifier")),
    tag = "Records",
    responses(
        (status = 200, description = "Note text or literal target URL", content_type = "text/plain"),
        (status = 404, description = "No such record", content_type = "text/html")
    )
)]
pub async fn raw_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> PageResult<String> {
    let record = load(&state, &id)?;
    info!(record_id = %record.id, kind = record.kind.as_str(), "Rendered raw record");
    Ok(record.content)
}

#[utoipa::path(
    get,
    path = "/{id}/edit",
    params(("id" = String, Path, description = "Record identifier")),
    tag = "Records",
    responses(
        (status = 302, description = "Redirect to the form prefilled for this record"),
        (status = 404, description = "No such record", content_type = "text/html")
    )
)]
pub async fn edit_record(State(state): State<AppState>, Path(id): Path<String>) -> PageResult {
    if !state.records().has(&id) {
        return Err(ApiError::record_not_found(&id).with_pages(&state.pages));
    }
    found(&state, &format!("/#{}", encode_path_segment(&id)))
}

#[utoipa::path(
    get,
    path = "/{id}/content",
    params(("id" = String, Path, description = "Record identifier")),
    tag = "Records",
    responses((status = 200, body = RecordContent))
)]
pub async fn record_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<RecordContent> {
    let content = fail_open(
        "content",
        &id,
        state.records().find(&id).map(|found| match found {
            Some(record) => RecordContent::of(&record),
            None => RecordContent::none(&id),
        }),
        || RecordContent::none(&id),
    );
    Json(content)
}

#[utoipa::path(
    get,
    path = "/{id}/locked",
    params(("id" = String, Path, description = "Record identifier")),
    tag = "Records",
    responses((status = 200, description = "\"1\" if the record is locked, otherwise \"0\"", content_type = "text/plain"))
)]
pub async fn record_locked(State(state): State<AppState>, Path(id): Path<String>) -> &'static str {
    let locked = fail_open(
        "locked",
        &id,
        state
            .records()
            .find(&id)
            .map(|found| found.is_some_and(|record| record.is_locked())),
        || false,
    );
    if locked {
        "1"
    } else {
        "0"
    }
}

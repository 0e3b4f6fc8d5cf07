// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{ContentType, NewRecordForm, RecordContent},
    state::AppState,
};

pub mod fail_open;
pub mod health;
pub mod records;

/// Build the application router. Assets under `static_dir` are served at
/// `/static/`.
pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let routes = Router::new()
        .route("/", get(records::index))
        .route("/new", post(records::create_record))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/{id}", get(records::view_record))
        .route("/{id}/raw", get(records::raw_record))
        .route("/{id}/edit", get(records::edit_record))
        .route("/{id}/content", get(records::record_content))
        .route("/{id}/locked", get(records::record_locked))
        .with_state(state);

    Router::new()
        .merge(routes)
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        records::index,
        records::create_record,
        records::view_record,
        records::raw_record,
        records::edit_record,
        records::record_content,
        records::record_locked,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            NewRecordForm,
            RecordContent,
            ContentType,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Records", description = "Note and redirect records"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

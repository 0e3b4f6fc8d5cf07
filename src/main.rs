// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{net::SocketAddr, sync::Arc};

use axum_server::Handle;
use tracing::info;

use zone_server::{
    api::router,
    config::AppConfig,
    hasher::Argon2Hasher,
    logging::init_tracing,
    render::Pages,
    shutdown::{drain_on, termination_signal, SHUTDOWN_GRACE},
    state::AppState,
    storage::{FileStorage, StoragePaths},
    tls::load_rustls_config,
};

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env().expect("Invalid configuration");
    init_tracing(config.log_format);

    let mut storage = FileStorage::new(StoragePaths::new(&config.data_dir));
    storage
        .initialize()
        .expect("Failed to initialize record storage");
    info!(data_dir = %config.data_dir.display(), "Record storage ready");

    let pages = Pages::load(&config.static_dir).expect("Failed to load page templates");
    let hasher = Arc::new(Argon2Hasher::new(config.argon2.clone()));
    let state = AppState::new(storage, hasher, pages);
    let app = router(state, &config.static_dir);

    let handle: Handle<SocketAddr> = Handle::new();
    tokio::spawn(drain_on(handle.clone(), termination_signal(), SHUTDOWN_GRACE));

    let addr = config.bind_addr;
    match &config.tls {
        Some(paths) => {
            let tls_config = load_rustls_config(paths)
                .await
                .expect("Failed to load TLS certificate and key");
            info!(%addr, "Zone server listening on https (docs at /docs)");
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .expect("HTTPS server failed");
        }
        None => {
            info!(%addr, "Zone server listening on http (docs at /docs)");
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .expect("HTTP server failed");
        }
    }

    info!("Zone server stopped");
}

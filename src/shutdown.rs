// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Graceful shutdown.

use std::{future::Future, net::SocketAddr, time::Duration};

use axum_server::Handle;
use tracing::info;

/// Time in-flight requests get to finish after a shutdown signal.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Resolves on Ctrl-C, or on SIGTERM where the platform has it.
pub async fn termination_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Wait for `signal`, then tell the server behind `handle` to drain.
pub async fn drain_on(
    handle: Handle<SocketAddr>,
    signal: impl Future<Output = ()>,
    grace: Duration,
) {
    signal.await;
    info!("Shutdown signal received, draining connections");
    handle.graceful_shutdown(Some(grace));
}

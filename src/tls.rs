// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTPS setup.

use std::io;

use axum_server::tls_rustls::RustlsConfig;

use crate::config::TlsPaths;

/// Install the ring crypto provider for rustls.
///
/// Must run before any TLS configuration is built. Returns `false` if a
/// provider was already installed.
pub fn install_crypto_provider() -> bool {
    rustls::crypto::ring::default_provider()
        .install_default()
        .is_ok()
}

/// Load the PEM certificate chain and private key named by `paths`.
pub async fn load_rustls_config(paths: &TlsPaths) -> io::Result<RustlsConfig> {
    install_crypto_provider();
    RustlsConfig::from_pem_file(&paths.cert, &paths.key).await
}

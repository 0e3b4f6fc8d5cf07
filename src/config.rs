// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for persisted records | `db` |
//! | `STATIC_DIR` | Directory with `index.html`, `template.html` and assets | `static` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `TLS_CERT_PATH` | PEM certificate chain; enables HTTPS with `TLS_KEY_PATH` | unset |
//! | `TLS_KEY_PATH` | PEM private key | unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `ARGON2_M_COST` | Argon2 memory cost in KiB | `19456` |
//! | `ARGON2_T_COST` | Argon2 iterations | `2` |
//! | `ARGON2_P_COST` | Argon2 parallelism | `1` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::logging::LogFormat;

/// Environment variable name for the data directory path.
pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const STATIC_DIR_ENV: &str = "STATIC_DIR";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const ARGON2_M_COST_ENV: &str = "ARGON2_M_COST";
pub const ARGON2_T_COST_ENV: &str = "ARGON2_T_COST";
pub const ARGON2_P_COST_ENV: &str = "ARGON2_P_COST";

pub const DEFAULT_DATA_DIR: &str = crate::storage::paths::DATA_ROOT;
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}")]
    InvalidValue { name: &'static str, value: String },
    #[error("{} and {} must be set together", TLS_CERT_PATH_ENV, TLS_KEY_PATH_ENV)]
    IncompleteTls,
    #[error("invalid Argon2 parameters: {0}")]
    Argon2(argon2::Error),
}

/// Certificate and key for HTTPS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub tls: Option<TlsPaths>,
    pub log_format: LogFormat,
    pub argon2: argon2::Params,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let host: IpAddr = parse_or(&var, HOST_ENV, DEFAULT_HOST)?;
        let port: u16 = parse_or(&var, PORT_ENV, DEFAULT_PORT)?;

        let tls = match (var(TLS_CERT_PATH_ENV), var(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteTls),
        };

        let defaults = argon2::Params::default();
        let argon2 = argon2::Params::new(
            parse_or(&var, ARGON2_M_COST_ENV, defaults.m_cost())?,
            parse_or(&var, ARGON2_T_COST_ENV, defaults.t_cost())?,
            parse_or(&var, ARGON2_P_COST_ENV, defaults.p_cost())?,
            None,
        )
        .map_err(ConfigError::Argon2)?;

        Ok(Self {
            data_dir: var(DATA_DIR_ENV)
                .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
                .into(),
            static_dir: var(STATIC_DIR_ENV)
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
            bind_addr: SocketAddr::new(host, port),
            tls,
            log_format: parse_or(&var, LOG_FORMAT_ENV, LogFormat::default())?,
            argon2,
        })
    }
}

fn parse_or<T: FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match var(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

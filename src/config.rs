// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `RWA_TOKEN_ADDRESS` | Deployed RWA token contract address | Unset (calls fail) |
//! | `WALLET_PROVIDER_URL` | Wallet provider JSON-RPC endpoint | Unset (no provider) |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DRAFT_TTL_SECS` | Idle time before an open draft is evicted | `3600` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;

use chrono::TimeDelta;

/// Environment variable name for the deployed contract address.
///
/// Not validated here. A missing or malformed value surfaces as a contract
/// call error on first use.
pub const CONTRACT_ADDRESS_ENV: &str = "RWA_TOKEN_ADDRESS";

/// Environment variable name for the wallet provider endpoint.
pub const WALLET_PROVIDER_URL_ENV: &str = "WALLET_PROVIDER_URL";

/// Environment variable name for the idle draft lifetime, in seconds.
pub const DRAFT_TTL_ENV: &str = "DRAFT_TTL_SECS";

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DRAFT_TTL_SECS: u64 = 3600;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT `{0}`")]
    InvalidPort(String),

    #[error("Invalid DRAFT_TTL_SECS `{0}`")]
    InvalidDraftTtl(String),

    #[error("Invalid bind address `{0}`")]
    InvalidBindAddress(String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub contract_address: Option<String>,
    pub wallet_provider_url: Option<String>,
    pub log_format: LogFormat,
    pub draft_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            contract_address: None,
            wallet_provider_url: None,
            log_format: LogFormat::default(),
            draft_ttl_secs: DEFAULT_DRAFT_TTL_SECS,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty(PORT_ENV) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let draft_ttl_secs = match non_empty(DRAFT_TTL_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidDraftTtl(raw.clone()))?,
            None => DEFAULT_DRAFT_TTL_SECS,
        };

        Ok(Self {
            host: non_empty(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            contract_address: non_empty(CONTRACT_ADDRESS_ENV),
            wallet_provider_url: non_empty(WALLET_PROVIDER_URL_ENV),
            log_format: non_empty(LOG_FORMAT_ENV)
                .map(|raw| LogFormat::parse(&raw))
                .unwrap_or_default(),
            draft_ttl_secs,
        })
    }

    /// How long an untouched draft is kept.
    pub fn draft_ttl(&self) -> TimeDelta {
        i64::try_from(self.draft_ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidBindAddress(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.contract_address.is_none());
        assert!(config.wallet_provider_url.is_none());
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.draft_ttl(), TimeDelta::hours(1));
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn reads_all_variables() {
        let config = AppConfig::from_lookup(lookup(&[
            (CONTRACT_ADDRESS_ENV, "0x76568BEd5Acf1A5Cd888773C8cAe9ea2a9131A63"),
            (WALLET_PROVIDER_URL_ENV, "http://127.0.0.1:8545"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "9090"),
            (LOG_FORMAT_ENV, "JSON"),
            (DRAFT_TTL_ENV, "900"),
        ]))
        .unwrap();

        assert_eq!(
            config.contract_address.as_deref(),
            Some("0x76568BEd5Acf1A5Cd888773C8cAe9ea2a9131A63")
        );
        assert_eq!(config.wallet_provider_url.as_deref(), Some("http://127.0.0.1:8545"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.draft_ttl(), TimeDelta::minutes(15));
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:9090");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = AppConfig::from_lookup(lookup(&[(CONTRACT_ADDRESS_ENV, "  ")])).unwrap();
        assert!(config.contract_address.is_none());
    }

    #[test]
    fn invalid_draft_ttl_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(DRAFT_TTL_ENV, "-5")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDraftTtl(_)));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(PORT_ENV, "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(_)));
    }
}

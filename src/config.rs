// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! by the client. Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `NFTIX_API_BASE_URL` | Backend REST base URL | `https://nftix-backend.onrender.com/api/v1` |
//! | `NFTIX_DATA_DIR` | Root directory for the persistent session store | `<platform data dir>/nftix` |
//! | `NFTIX_REQUEST_TIMEOUT_SECS` | Timeout applied to every outbound call | `10` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `nftix_client=info,nftix=info,warn` |

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{ClientError, ClientResult};

/// Environment variable name for the backend base URL.
pub const API_BASE_URL_ENV: &str = "NFTIX_API_BASE_URL";

/// Environment variable name for the persistent store root.
pub const DATA_DIR_ENV: &str = "NFTIX_DATA_DIR";

/// Environment variable name for the per-request timeout, in seconds.
pub const REQUEST_TIMEOUT_ENV: &str = "NFTIX_REQUEST_TIMEOUT_SECS";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Hosted backend used when no base URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://nftix-backend.onrender.com/api/v1";

/// Default bound on every outbound call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default `RUST_LOG` filter for the binary.
pub const DEFAULT_LOG_FILTER: &str = "nftix_client=info,nftix=info,warn";

/// Directory name used under the platform data directory.
const DATA_DIR_NAME: &str = "nftix";

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    pub fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL; endpoint paths are appended to it.
    pub api_base_url: Url,
    /// Root of the persistent session store.
    pub data_dir: PathBuf,
    /// Bound applied to each outbound call.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("Default base URL is valid"),
            data_dir: default_data_dir(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = non_empty(lookup(API_BASE_URL_ENV)) {
            config.api_base_url = parse_base_url(&raw)?;
        }

        if let Some(raw) = non_empty(lookup(DATA_DIR_ENV)) {
            config.data_dir = PathBuf::from(raw);
        }

        if let Some(raw) = non_empty(lookup(REQUEST_TIMEOUT_ENV)) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("{REQUEST_TIMEOUT_ENV} must be a whole number of seconds"))
            })?;
            if secs == 0 {
                return Err(ClientError::Config(format!(
                    "{REQUEST_TIMEOUT_ENV} must be greater than zero"
                )));
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, url: Url) -> Self {
        self.api_base_url = url;
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_base_url(raw: &str) -> ClientResult<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ClientError::Config(format!("{API_BASE_URL_ENV} is not a valid URL: {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ClientError::Config(format!(
                "{API_BASE_URL_ENV} must use http or https, got {other}"
            )))
        }
    }

    if url.cannot_be_a_base() {
        return Err(ClientError::Config(format!(
            "{API_BASE_URL_ENV} cannot be used as a base URL"
        )));
    }

    Ok(url)
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{DATA_DIR_NAME}")))
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
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_base_url.as_str(), DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert!(config.data_dir.ends_with("nftix") || config.data_dir.ends_with(".nftix"));
    }

    #[test]
    fn overrides_are_applied() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_BASE_URL_ENV, "http://localhost:4000/api/v1"),
            (DATA_DIR_ENV, "/tmp/nftix-test"),
            (REQUEST_TIMEOUT_ENV, "3"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url.as_str(), "http://localhost:4000/api/v1");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/nftix-test"));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[(API_BASE_URL_ENV, "  ")])).unwrap();
        assert_eq!(config.api_base_url.as_str(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = ClientConfig::from_lookup(lookup(&[(API_BASE_URL_ENV, "not a url")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));

        let err =
            ClientConfig::from_lookup(lookup(&[(API_BASE_URL_ENV, "ftp://example.com")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn rejects_zero_or_garbage_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[(REQUEST_TIMEOUT_ENV, "0")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));

        let err = ClientConfig::from_lookup(lookup(&[(REQUEST_TIMEOUT_ENV, "ten")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn log_format_parsing() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("anything"), LogFormat::Pretty);
    }
}

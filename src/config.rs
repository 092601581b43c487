//! Configuration management for the hospital registry.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file. Nothing is printed to stdout, which MCP uses for communication.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Default base URL of the M3O database API.
pub const DEFAULT_M3O_API_URL: &str = "https://api.m3o.com/v1";

/// Where registrations are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// Process-local store, lost on exit
    #[default]
    Memory,
    /// M3O hosted database REST API
    M3o,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "m3o" => Ok(Self::M3o),
            other => Err(ConfigError::InvalidValue {
                var: "STORAGE_BACKEND".to_string(),
                reason: format!("Must be one of memory, m3o; got: {}", other),
            }),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::M3o => f.write_str("m3o"),
        }
    }
}

/// Configuration for the hospital registry.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend (default: memory)
    pub storage_backend: StorageBackend,

    /// M3O API base URL
    pub m3o_api_url: String,

    /// M3O API token; always present when the backend is `m3o`
    pub m3o_api_token: Option<String>,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `STORAGE_BACKEND`: `memory` or `m3o` (default: memory)
    /// - `M3O_API_URL`: M3O API base URL (default: https://api.m3o.com/v1)
    /// - `M3O_API_TOKEN`: M3O bearer token, required for the `m3o` backend
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // dotenvy does not print to stdout
        let _ = dotenvy::dotenv();

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StorageBackend::default(),
        };

        let m3o_api_url =
            env::var("M3O_API_URL").unwrap_or_else(|_| DEFAULT_M3O_API_URL.to_string());
        if !m3o_api_url.starts_with("http://") && !m3o_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "M3O_API_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let m3o_api_token = env::var("M3O_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());
        if storage_backend == StorageBackend::M3o && m3o_api_token.is_none() {
            return Err(ConfigError::MissingVar("M3O_API_TOKEN".to_string()));
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            storage_backend,
            m3o_api_url,
            m3o_api_token,
            request_timeout,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_backend: StorageBackend::Memory,
            m3o_api_url: DEFAULT_M3O_API_URL.to_string(),
            m3o_api_token: None,
            request_timeout: 10,
            log_level: "error".to_string(),
        }
    }
}

//! HTTP client for the M3O hosted database API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles bearer authentication and
//! error mapping for the `/db/Read` and `/db/Create` endpoints.

mod async_wrapper;
pub use async_wrapper::{AsyncM3oClient, AsyncM3oClientImpl};

use crate::config::{Config, DEFAULT_M3O_API_URL};
use crate::error::{M3oApiError, M3oApiResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::HospitalRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Request body for `/db/Read`.
#[derive(Debug, Serialize)]
struct ReadRequest<'a> {
    table: &'a str,
    query: &'a str,
}

/// Response body of `/db/Read`.
#[derive(Debug, Deserialize)]
pub struct ReadResponse {
    #[serde(default)]
    pub records: Vec<serde_json::Value>,
}

/// Request body for `/db/Create`.
#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    record: &'a HospitalRecord,
    table: &'a str,
}

/// Response body of `/db/Create`.
#[derive(Debug, Deserialize)]
pub struct CreateResponse {
    /// Id of the created record
    #[serde(default)]
    pub id: String,
}

/// HTTP client for the M3O database API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct M3oClient {
    /// Base URL for the M3O API
    base_url: String,

    /// Bearer token; requests fail with `Unauthorized` without one
    api_token: Option<String>,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl M3oClient {
    /// Create a new M3oClient from configuration.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.m3o_api_url.clone(),
            api_token: config.m3o_api_token.clone(),
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create an M3oClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_token: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_token,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Whether a non-blank session token is configured.
    pub fn has_session_key(&self) -> bool {
        self.api_token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty())
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a POST request with bearer authentication and a JSON body.
    fn post<T: Serialize>(&self, path: &str, body: &T) -> M3oApiResult<ureq::Response> {
        let token = self
            .api_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .ok_or(M3oApiError::Unauthorized)?;
        let url = self.build_url(path);
        let timer = HttpTimer::new(self.metrics.clone());

        tracing::debug!("POST {}", url);

        let result = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", token))
            .set("Content-Type", "application/json")
            .set("Accept", "application/json")
            .send_json(body)
            .map_err(|e| self.map_error(e));

        match &result {
            Ok(response) => {
                tracing::debug!("POST {} - Success (status: {})", url, response.status());
                timer.complete();
            }
            Err(e) => {
                tracing::error!("POST {} - Error: {:?}", url, e);
                timer.complete_with_error();
            }
        }

        result
    }

    /// Map a ureq error to an M3oApiError.
    fn map_error(&self, error: ureq::Error) -> M3oApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 | 403 => M3oApiError::Unauthorized,
                    429 => M3oApiError::RateLimitExceeded,
                    _ => M3oApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    M3oApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    M3oApiError::Timeout
                } else {
                    M3oApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Read the records of `table` matching `query`.
    pub fn read_records(&self, table: &str, query: &str) -> M3oApiResult<Vec<serde_json::Value>> {
        let response = self.post("/db/Read", &ReadRequest { table, query })?;
        let body = response
            .into_string()
            .map_err(|e| M3oApiError::HttpError(e.to_string()))?;

        let read: ReadResponse = serde_json::from_str(&body).map_err(M3oApiError::JsonError)?;
        Ok(read.records)
    }

    /// Create a record in `table`, returning the id assigned by the store.
    pub fn create_record(&self, table: &str, record: &HospitalRecord) -> M3oApiResult<String> {
        tracing::info!("Creating record {} in {}", record.id, table);

        let response = self.post("/db/Create", &CreateRequest { record, table })?;
        let body = response
            .into_string()
            .map_err(|e| M3oApiError::HttpError(e.to_string()))?;

        let created: CreateResponse =
            serde_json::from_str(&body).map_err(M3oApiError::JsonError)?;
        Ok(created.id)
    }
}

impl Default for M3oClient {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_M3O_API_URL.to_string(), None)
    }
}

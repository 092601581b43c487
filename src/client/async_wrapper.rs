//! Async wrapper around the synchronous M3oClient.
//!
//! HTTP calls run on tokio's blocking thread pool via `spawn_blocking` so
//! they never stall the async runtime.

use crate::client::M3oClient;
use crate::error::{M3oApiError, M3oApiResult};
use crate::models::HospitalRecord;
use async_trait::async_trait;
use std::sync::Arc;

/// Async interface to the M3O database API.
#[async_trait]
pub trait AsyncM3oClient: Send + Sync {
    /// Whether a session token is configured.
    fn has_session_key(&self) -> bool;

    async fn read_records(&self, table: &str, query: &str)
        -> M3oApiResult<Vec<serde_json::Value>>;

    async fn create_record(&self, table: &str, record: &HospitalRecord) -> M3oApiResult<String>;
}

/// Async wrapper around synchronous M3oClient.
#[derive(Clone)]
pub struct AsyncM3oClientImpl {
    client: Arc<M3oClient>,
}

impl AsyncM3oClientImpl {
    pub fn new(client: M3oClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncM3oClient for AsyncM3oClientImpl {
    fn has_session_key(&self) -> bool {
        self.client.has_session_key()
    }

    async fn read_records(
        &self,
        table: &str,
        query: &str,
    ) -> M3oApiResult<Vec<serde_json::Value>> {
        let client = self.client.clone();
        let table = table.to_string();
        let query = query.to_string();

        tokio::task::spawn_blocking(move || client.read_records(&table, &query))
            .await
            .map_err(|e| M3oApiError::HttpError(format!("Task join error: {}", e)))?
    }

    async fn create_record(&self, table: &str, record: &HospitalRecord) -> M3oApiResult<String> {
        let client = self.client.clone();
        let table = table.to_string();
        let record = record.clone();

        tokio::task::spawn_blocking(move || client.create_record(&table, &record))
            .await
            .map_err(|e| M3oApiError::HttpError(format!("Task join error: {}", e)))?
    }
}

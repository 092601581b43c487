//! Hospital registry - main entry point
//!
//! Builds the storage adapter chosen by configuration and serves the MCP
//! registration tools over stdio.

use anyhow::Result;
use hospital_registry::client::{AsyncM3oClient, AsyncM3oClientImpl, M3oClient};
use hospital_registry::config::StorageBackend;
use hospital_registry::repositories::{
    InMemoryStore, InMemoryUnitOfWorkFactory, M3oUnitOfWorkFactory, UnitOfWorkFactory,
};
use hospital_registry::services::{HospitalRegistrationService, HospitalRegistrationServiceImpl};
use hospital_registry::{Config, HospitalRegistryServer, Metrics};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration before logging so LOG_LEVEL can seed the filter
    let config = Config::from_env();
    let log_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!("Starting hospital registry with {} storage", config.storage_backend);

    let metrics = Metrics::new();
    let uow_factory: Arc<dyn UnitOfWorkFactory> = match config.storage_backend {
        StorageBackend::Memory => Arc::new(InMemoryUnitOfWorkFactory::new(
            InMemoryStore::new(),
            metrics.clone(),
        )),
        StorageBackend::M3o => {
            info!("Using M3O API at {}", config.m3o_api_url);
            let sync_client = M3oClient::new(&config, metrics.clone());
            let client =
                Arc::new(AsyncM3oClientImpl::new(sync_client)) as Arc<dyn AsyncM3oClient>;
            Arc::new(M3oUnitOfWorkFactory::new(client, metrics.clone()))
        }
    };

    let registration_service = Arc::new(HospitalRegistrationServiceImpl::new(uow_factory))
        as Arc<dyn HospitalRegistrationService>;
    let server = HospitalRegistryServer::new(registration_service);

    info!("Starting MCP server with stdio transport");
    hospital_registry::server::run_server(server).await?;

    let summary = metrics.summary();
    info!(
        committed = summary.registrations_committed_total,
        rolled_back = summary.registrations_rolled_back_total,
        http_requests = summary.http_requests_total,
        "Hospital registry shutdown complete"
    );
    Ok(())
}

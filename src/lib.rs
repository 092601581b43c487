//! Hospital registry - registration backend for hospitals and healthcare centers.
//!
//! A registration is validated, built into one of two aggregate variants and
//! persisted through a unit of work over a pluggable storage adapter.
//!
//! # Architecture
//!
//! - **domain**: Value objects and the hospital aggregate with its factory
//! - **models**: Inbound registration request and persisted record shapes
//! - **repositories**: Repository and unit of work traits, in-memory and M3O adapters
//! - **services**: Domain service and registration use case
//! - **client**: HTTP client for the M3O database API
//! - **server**: MCP protocol server
//! - **error**: Error types for precise error handling
//! - **config**: Configuration management from environment variables

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;

pub use client::M3oClient;
pub use config::{Config, StorageBackend};
pub use domain::{HospitalAttributes, HospitalEntity, HospitalKind};
pub use error::{ConfigError, M3oApiError, RegistrationError, RegistrationResult};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{HospitalRecord, HospitalRegistrationEntry, RegisterKeyContact};
pub use server::HospitalRegistryServer;

//! Storage adapter for the M3O hosted database.
//!
//! Saves run a best-effort duplicate lookup against `/db/Read` and queue the
//! record; the queue is flushed to `/db/Create` when the unit of work commits
//! and cleared when it rolls back.

use super::unit_of_work::{UnitOfWork, UnitOfWorkFactory, UowSessionFlag, UowState};
use super::HospitalRepository;
use crate::client::AsyncM3oClient;
use crate::domain::{
    HospitalAttributes, HospitalEntity, HospitalEntry, HospitalKind, UnclaimedHospital,
    UnverifiedRegisteredHospital,
};
use crate::error::{RegistrationError, RegistrationResult};
use crate::metrics::Metrics;
use crate::models::HospitalRecord;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A create call waiting for commit.
#[derive(Debug, Clone)]
struct PendingCreate {
    table: &'static str,
    record: HospitalRecord,
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Query matching records with the same name, ownership and address.
pub fn duplicate_query(entry: &HospitalEntry) -> String {
    let address = entry.address();
    let mut clauses = Vec::with_capacity(6);
    if let Some(ownership_type) = entry.ownership_type() {
        clauses.push(format!("ownership_type == {}", quote(ownership_type.as_str())));
    }
    clauses.push(format!("name == {}", quote(entry.hospital_name())));
    clauses.push(format!("address.street == {}", quote(&address.street)));
    clauses.push(format!("address.city == {}", quote(&address.city)));
    clauses.push(format!("address.state == {}", quote(&address.state)));
    clauses.push(format!("address.country == {}", quote(&address.country)));
    clauses.join(" and ")
}

/// Repository queueing hospital records for the M3O database.
pub struct M3oHospitalRepository {
    client: Arc<dyn AsyncM3oClient>,
    pending: Mutex<Vec<PendingCreate>>,
}

impl M3oHospitalRepository {
    pub fn new(client: Arc<dyn AsyncM3oClient>) -> Self {
        Self {
            client,
            pending: Mutex::new(Vec::new()),
        }
    }

    fn pending(&self) -> MutexGuard<'_, Vec<PendingCreate>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn record_exists(&self, hospital: &HospitalEntity) -> RegistrationResult<bool> {
        let table = hospital.kind().table();
        let query = duplicate_query(hospital.entry());
        let records = self.client.read_records(table, &query).await?;
        Ok(!records.is_empty())
    }

    async fn enqueue(
        &self,
        expected: HospitalKind,
        attrs: HospitalAttributes,
    ) -> RegistrationResult<HospitalEntity> {
        let result = self.try_enqueue(expected, &attrs).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, parameters = ?attrs, "Failed to save {}", expected);
        }
        result
    }

    async fn try_enqueue(
        &self,
        expected: HospitalKind,
        attrs: &HospitalAttributes,
    ) -> RegistrationResult<HospitalEntity> {
        let hospital = HospitalEntity::build_factory(attrs.clone())?;
        if hospital.kind() != expected {
            return Err(RegistrationError::VariantMismatch {
                expected,
                actual: hospital.kind(),
            });
        }

        if self.record_exists(&hospital).await? {
            return Err(RegistrationError::RecordAlreadyExists {
                table: expected.table().to_string(),
                hospital_name: hospital.entry().hospital_name().to_string(),
            });
        }

        self.pending().push(PendingCreate {
            table: expected.table(),
            record: HospitalRecord::from(&hospital),
        });
        Ok(hospital)
    }

    /// Execute queued creates in order.
    ///
    /// Stops at the first failure, leaving that create and the ones after it
    /// queued. Records created before the failure stay in the store.
    async fn flush(&self) -> RegistrationResult<usize> {
        let queued = std::mem::take(&mut *self.pending());
        let total = queued.len();

        for (done, create) in queued.iter().enumerate() {
            if let Err(e) = self.client.create_record(create.table, &create.record).await {
                let mut pending = self.pending();
                let mut remaining = queued[done..].to_vec();
                remaining.append(&mut pending);
                *pending = remaining;
                return Err(e.into());
            }
        }

        Ok(total)
    }

    fn clear(&self) -> usize {
        let mut pending = self.pending();
        let count = pending.len();
        pending.clear();
        count
    }
}

#[async_trait]
impl HospitalRepository for M3oHospitalRepository {
    async fn save_unverified_hospital(
        &self,
        attrs: HospitalAttributes,
    ) -> RegistrationResult<UnverifiedRegisteredHospital> {
        self.enqueue(HospitalKind::UnverifiedRegistered, attrs)
            .await?
            .into_unverified_registered()
    }

    async fn save_unclaimed_hospital(
        &self,
        attrs: HospitalAttributes,
    ) -> RegistrationResult<UnclaimedHospital> {
        self.enqueue(HospitalKind::Unclaimed, attrs)
            .await?
            .into_unclaimed()
    }

    fn pending_operations(&self) -> usize {
        self.pending().len()
    }
}

/// Unit of work over an [`M3oHospitalRepository`].
pub struct M3oUnitOfWork {
    client: Arc<dyn AsyncM3oClient>,
    repository: Arc<M3oHospitalRepository>,
    state: UowState,
    metrics: Metrics,
}

impl M3oUnitOfWork {
    pub fn new(client: Arc<dyn AsyncM3oClient>, metrics: Metrics) -> Self {
        let repository = Arc::new(M3oHospitalRepository::new(client.clone()));
        Self {
            client,
            repository,
            state: UowState::Idle,
            metrics,
        }
    }
}

#[async_trait]
impl UnitOfWork for M3oUnitOfWork {
    async fn enter(&mut self) -> RegistrationResult<()> {
        if !self.client.has_session_key() {
            return Err(RegistrationError::SessionUnavailable(
                "M3O session key is not set".to_string(),
            ));
        }

        let pending = self.repository.pending_operations();
        if pending > 0 {
            return Err(RegistrationError::PendingTransactions(pending));
        }

        self.state = UowState::Open;
        Ok(())
    }

    fn repository(&self) -> Arc<dyn HospitalRepository> {
        self.repository.clone()
    }

    async fn commit(&mut self) -> RegistrationResult<UowSessionFlag> {
        if self.state != UowState::Open {
            return Err(RegistrationError::SessionUnavailable(format!(
                "cannot commit a unit of work in state {:?}",
                self.state
            )));
        }

        tracing::info!("Committing M3O unit of work");
        let created = self.repository.flush().await?;
        self.metrics.record_commit(created);
        self.state = UowState::Committed;
        tracing::info!(records = created, "Committed M3O unit of work");
        Ok(UowSessionFlag::Committed)
    }

    async fn rollback(&mut self) -> UowSessionFlag {
        let cleared = self.repository.clear();
        self.metrics.record_rollback();
        self.state = UowState::RolledBack;
        tracing::warn!(cleared, "Rolled back M3O unit of work, pending transactions cleared");
        UowSessionFlag::RolledBack
    }

    async fn close(&mut self) -> UowSessionFlag {
        if self.state != UowState::Closed {
            tracing::debug!("Closing M3O unit of work");
            self.state = UowState::Closed;
        }
        UowSessionFlag::Closed
    }

    fn state(&self) -> UowState {
        self.state
    }
}

/// Creates M3O units of work sharing one client handle.
#[derive(Clone)]
pub struct M3oUnitOfWorkFactory {
    client: Arc<dyn AsyncM3oClient>,
    metrics: Metrics,
}

impl M3oUnitOfWorkFactory {
    pub fn new(client: Arc<dyn AsyncM3oClient>, metrics: Metrics) -> Self {
        Self { client, metrics }
    }
}

impl UnitOfWorkFactory for M3oUnitOfWorkFactory {
    fn create(&self) -> Box<dyn UnitOfWork> {
        Box::new(M3oUnitOfWork::new(self.client.clone(), self.metrics.clone()))
    }
}

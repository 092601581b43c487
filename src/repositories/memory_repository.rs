//! Process-local storage adapter.
//!
//! Committed hospitals live in an [`InMemoryStore`] shared by every unit of
//! work created from the same factory. Each unit of work stages its writes in
//! a private session and publishes them to the store only on commit.

use super::unit_of_work::{UnitOfWork, UnitOfWorkFactory, UowSessionFlag, UowState};
use super::HospitalRepository;
use crate::domain::{
    HospitalAttributes, HospitalEntity, HospitalKind, UnclaimedHospital,
    UnverifiedRegisteredHospital,
};
use crate::error::{RegistrationError, RegistrationResult};
use crate::metrics::Metrics;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Two hospitals of the same variant clash when name, ownership and address match.
fn is_duplicate(a: &HospitalEntity, b: &HospitalEntity) -> bool {
    let (a_entry, b_entry) = (a.entry(), b.entry());
    let (a_addr, b_addr) = (a_entry.address(), b_entry.address());

    a.kind() == b.kind()
        && a_entry.hospital_name() == b_entry.hospital_name()
        && a_entry.ownership_type() == b_entry.ownership_type()
        && a_addr.street == b_addr.street
        && a_addr.city == b_addr.city
        && a_addr.state == b_addr.state
        && a_addr.country == b_addr.country
}

/// Committed hospitals, shared between units of work.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    hospitals: Arc<Mutex<Vec<HospitalEntity>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed hospitals of the given variant, oldest first.
    pub fn hospitals(&self, kind: HospitalKind) -> Vec<HospitalEntity> {
        lock(&self.hospitals)
            .iter()
            .filter(|h| h.kind() == kind)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.hospitals).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains_duplicate_of(&self, hospital: &HospitalEntity) -> bool {
        lock(&self.hospitals)
            .iter()
            .any(|existing| is_duplicate(existing, hospital))
    }

    fn publish(&self, staged: Vec<HospitalEntity>) {
        lock(&self.hospitals).extend(staged);
    }
}

/// Repository staging writes into the session bound by its unit of work.
#[derive(Debug)]
pub struct InMemoryHospitalRepository {
    store: InMemoryStore,
    // None until a unit of work binds a session
    session: Mutex<Option<Vec<HospitalEntity>>>,
}

impl InMemoryHospitalRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self {
            store,
            session: Mutex::new(None),
        }
    }

    fn bind_session(&self) -> RegistrationResult<()> {
        let mut session = lock(&self.session);
        if let Some(staged) = session.as_ref().filter(|staged| !staged.is_empty()) {
            return Err(RegistrationError::PendingTransactions(staged.len()));
        }
        *session = Some(Vec::new());
        Ok(())
    }

    fn publish_session(&self) -> RegistrationResult<usize> {
        let staged = lock(&self.session)
            .as_mut()
            .map(std::mem::take)
            .ok_or_else(|| RegistrationError::SessionUnavailable("no session bound".to_string()))?;
        let count = staged.len();
        self.store.publish(staged);
        Ok(count)
    }

    fn discard_session(&self) -> usize {
        lock(&self.session).as_mut().map_or(0, |staged| {
            let count = staged.len();
            staged.clear();
            count
        })
    }

    /// Unbind the session unless it still holds unresolved writes.
    fn release_session(&self) {
        let mut session = lock(&self.session);
        if session.as_ref().map_or(true, Vec::is_empty) {
            *session = None;
        }
    }

    fn stage(
        &self,
        expected: HospitalKind,
        attrs: HospitalAttributes,
    ) -> RegistrationResult<HospitalEntity> {
        let result = self.try_stage(expected, &attrs);
        if let Err(e) = &result {
            tracing::error!(error = %e, parameters = ?attrs, "Failed to save {}", expected);
        }
        result
    }

    fn try_stage(
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

        let mut session = lock(&self.session);
        let staged = session
            .as_mut()
            .ok_or_else(|| RegistrationError::SessionUnavailable("no session bound".to_string()))?;

        if self.store.contains_duplicate_of(&hospital)
            || staged.iter().any(|s| is_duplicate(s, &hospital))
        {
            return Err(RegistrationError::RecordAlreadyExists {
                table: expected.table().to_string(),
                hospital_name: hospital.entry().hospital_name().to_string(),
            });
        }

        tracing::debug!(
            hospital_id = %hospital.entry().hospital_id(),
            "Staged {}",
            expected
        );
        staged.push(hospital.clone());
        Ok(hospital)
    }
}

#[async_trait]
impl HospitalRepository for InMemoryHospitalRepository {
    async fn save_unverified_hospital(
        &self,
        attrs: HospitalAttributes,
    ) -> RegistrationResult<UnverifiedRegisteredHospital> {
        self.stage(HospitalKind::UnverifiedRegistered, attrs)?
            .into_unverified_registered()
    }

    async fn save_unclaimed_hospital(
        &self,
        attrs: HospitalAttributes,
    ) -> RegistrationResult<UnclaimedHospital> {
        self.stage(HospitalKind::Unclaimed, attrs)?.into_unclaimed()
    }

    fn pending_operations(&self) -> usize {
        lock(&self.session).as_ref().map_or(0, Vec::len)
    }
}

/// Unit of work over an [`InMemoryHospitalRepository`].
pub struct InMemoryUnitOfWork {
    repository: Arc<InMemoryHospitalRepository>,
    state: UowState,
    metrics: Metrics,
}

impl InMemoryUnitOfWork {
    pub fn new(repository: Arc<InMemoryHospitalRepository>, metrics: Metrics) -> Self {
        Self {
            repository,
            state: UowState::Idle,
            metrics,
        }
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn enter(&mut self) -> RegistrationResult<()> {
        tracing::debug!("Binding in-memory session to repository");
        self.repository.bind_session()?;
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
        let count = self.repository.publish_session()?;
        self.metrics.record_commit(count);
        self.state = UowState::Committed;
        tracing::info!(records = count, "Committed in-memory unit of work");
        Ok(UowSessionFlag::Committed)
    }

    async fn rollback(&mut self) -> UowSessionFlag {
        let discarded = self.repository.discard_session();
        self.metrics.record_rollback();
        self.state = UowState::RolledBack;
        tracing::warn!(discarded, "Rolled back in-memory unit of work");
        UowSessionFlag::RolledBack
    }

    async fn close(&mut self) -> UowSessionFlag {
        if self.state != UowState::Closed {
            self.repository.release_session();
            self.state = UowState::Closed;
        }
        UowSessionFlag::Closed
    }

    fn state(&self) -> UowState {
        self.state
    }
}

/// Creates in-memory units of work over one shared store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUnitOfWorkFactory {
    store: InMemoryStore,
    metrics: Metrics,
}

impl InMemoryUnitOfWorkFactory {
    pub fn new(store: InMemoryStore, metrics: Metrics) -> Self {
        Self { store, metrics }
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }
}

impl UnitOfWorkFactory for InMemoryUnitOfWorkFactory {
    fn create(&self) -> Box<dyn UnitOfWork> {
        let repository = Arc::new(InMemoryHospitalRepository::new(self.store.clone()));
        Box::new(InMemoryUnitOfWork::new(repository, self.metrics.clone()))
    }
}

use async_trait::async_trait;
use hospital_registry::domain::{
    HospitalAttributes, HospitalEntity, UnclaimedHospital, UnverifiedRegisteredHospital,
};
use hospital_registry::error::{RegistrationError, RegistrationResult};
use hospital_registry::repositories::{
    HospitalRepository, UnitOfWork, UnitOfWorkFactory, UowSessionFlag, UowState,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Shared record of lifecycle and repository calls.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct CallLog {
    counts: Arc<Mutex<HashMap<String, usize>>>,
    order: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl CallLog {
    fn track_call(&self, method: &str) {
        *self
            .counts
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_insert(0) += 1;
        self.order.lock().unwrap().push(method.to_string());
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        *self.counts.lock().unwrap().get(method).unwrap_or(&0)
    }

    /// Every call in the order it happened.
    pub fn calls(&self) -> Vec<String> {
        self.order.lock().unwrap().clone()
    }
}

/// Mock repository that validates through the aggregate factory and can be
/// told to fail the next save with a canned error.
#[allow(dead_code)]
pub struct MockHospitalRepository {
    log: CallLog,
    fail_save: Mutex<Option<RegistrationError>>,
}

#[allow(dead_code)]
impl MockHospitalRepository {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_save: Mutex::new(None),
        }
    }

    fn take_failure(&self) -> Option<RegistrationError> {
        self.fail_save.lock().unwrap().take()
    }
}

#[async_trait]
impl HospitalRepository for MockHospitalRepository {
    async fn save_unverified_hospital(
        &self,
        attrs: HospitalAttributes,
    ) -> RegistrationResult<UnverifiedRegisteredHospital> {
        self.log.track_call("save_unverified_hospital");
        if let Some(e) = self.take_failure() {
            return Err(e);
        }
        HospitalEntity::build_factory(attrs)?.into_unverified_registered()
    }

    async fn save_unclaimed_hospital(
        &self,
        attrs: HospitalAttributes,
    ) -> RegistrationResult<UnclaimedHospital> {
        self.log.track_call("save_unclaimed_hospital");
        if let Some(e) = self.take_failure() {
            return Err(e);
        }
        HospitalEntity::build_factory(attrs)?.into_unclaimed()
    }

    fn pending_operations(&self) -> usize {
        0
    }
}

/// Mock unit of work counting every lifecycle call.
#[allow(dead_code)]
pub struct MockUnitOfWork {
    log: CallLog,
    repository: Arc<MockHospitalRepository>,
    state: UowState,
    fail_enter: bool,
    fail_commit: bool,
}

#[allow(dead_code)]
impl MockUnitOfWork {
    pub fn new(log: CallLog) -> Self {
        Self {
            repository: Arc::new(MockHospitalRepository::new(log.clone())),
            log,
            state: UowState::Idle,
            fail_enter: false,
            fail_commit: false,
        }
    }

    pub fn failing_enter(mut self) -> Self {
        self.fail_enter = true;
        self
    }

    pub fn failing_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    pub fn failing_save(self, error: RegistrationError) -> Self {
        *self.repository.fail_save.lock().unwrap() = Some(error);
        self
    }
}

#[async_trait]
impl UnitOfWork for MockUnitOfWork {
    async fn enter(&mut self) -> RegistrationResult<()> {
        self.log.track_call("enter");
        if self.fail_enter {
            return Err(RegistrationError::SessionUnavailable(
                "mock session refused".to_string(),
            ));
        }
        self.state = UowState::Open;
        Ok(())
    }

    fn repository(&self) -> Arc<dyn HospitalRepository> {
        self.repository.clone()
    }

    async fn commit(&mut self) -> RegistrationResult<UowSessionFlag> {
        self.log.track_call("commit");
        if self.fail_commit {
            return Err(RegistrationError::PendingTransactions(1));
        }
        self.state = UowState::Committed;
        Ok(UowSessionFlag::Committed)
    }

    async fn rollback(&mut self) -> UowSessionFlag {
        self.log.track_call("rollback");
        self.state = UowState::RolledBack;
        UowSessionFlag::RolledBack
    }

    async fn close(&mut self) -> UowSessionFlag {
        self.log.track_call("close");
        self.state = UowState::Closed;
        UowSessionFlag::Closed
    }

    fn state(&self) -> UowState {
        self.state
    }
}

/// Factory handing out mock units of work that share one call log.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockUnitOfWorkFactory {
    pub log: CallLog,
    pub created: Arc<Mutex<usize>>,
}

impl UnitOfWorkFactory for MockUnitOfWorkFactory {
    fn create(&self) -> Box<dyn UnitOfWork> {
        *self.created.lock().unwrap() += 1;
        Box::new(MockUnitOfWork::new(self.log.clone()))
    }
}

//! Unit of work protocol.
//!
//! A unit of work owns one storage session and the repository bound to it.
//! [`scoped`] drives it through enter, commit or rollback, and close so that
//! every exit path releases the session exactly once.

use super::HospitalRepository;
use crate::error::RegistrationResult;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Acknowledgement returned by unit of work lifecycle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UowSessionFlag {
    Committed,
    RolledBack,
    Closed,
}

/// Lifecycle state of a unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UowState {
    /// Created, session not acquired yet
    #[default]
    Idle,
    Open,
    Committed,
    RolledBack,
    Closed,
}

/// A transactional boundary around a [`HospitalRepository`].
#[async_trait]
pub trait UnitOfWork: Send {
    /// Acquire the session and bind it to the repository.
    ///
    /// Fails if the session cannot be acquired or the repository still holds
    /// writes from an earlier unit of work that never resolved.
    async fn enter(&mut self) -> RegistrationResult<()>;

    /// The repository bound to this unit of work.
    fn repository(&self) -> Arc<dyn HospitalRepository>;

    /// Persist every staged write.
    async fn commit(&mut self) -> RegistrationResult<UowSessionFlag>;

    /// Discard every staged write.
    async fn rollback(&mut self) -> UowSessionFlag;

    /// Release the session. Calling it again is a no-op.
    async fn close(&mut self) -> UowSessionFlag;

    fn state(&self) -> UowState;
}

/// Creates one unit of work per registration attempt.
pub trait UnitOfWorkFactory: Send + Sync {
    fn create(&self) -> Box<dyn UnitOfWork>;
}

/// Run `work` inside `uow`.
///
/// - enter fails: close, return the error
/// - `work` succeeds: commit, then close; a failed commit is rolled back
/// - `work` fails: rollback once, close once, return the original error
pub async fn scoped<T, F, Fut>(uow: &mut dyn UnitOfWork, work: F) -> RegistrationResult<T>
where
    F: FnOnce(Arc<dyn HospitalRepository>) -> Fut + Send,
    Fut: Future<Output = RegistrationResult<T>> + Send,
    T: Send,
{
    if let Err(e) = uow.enter().await {
        tracing::error!(error = %e, "Failed to enter unit of work");
        uow.close().await;
        return Err(e);
    }

    match work(uow.repository()).await {
        Ok(value) => match uow.commit().await {
            Ok(_) => {
                uow.close().await;
                Ok(value)
            }
            Err(e) => {
                tracing::error!(error = %e, "Commit failed, rolling back unit of work");
                uow.rollback().await;
                uow.close().await;
                Err(e)
            }
        },
        Err(e) => {
            tracing::error!(
                error = %e,
                model = ?e.model(),
                "Error during unit of work, rolling back"
            );
            uow.rollback().await;
            uow.close().await;
            Err(e)
        }
    }
}

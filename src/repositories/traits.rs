use crate::domain::{HospitalAttributes, UnclaimedHospital, UnverifiedRegisteredHospital};
use crate::error::RegistrationResult;
use async_trait::async_trait;

/// Repository for hospital registrations.
///
/// Implementations re-run the aggregate factory on the attributes they are
/// given and refuse to persist a variant other than the one the method
/// names. Writes become visible once the owning unit of work commits.
#[async_trait]
pub trait HospitalRepository: Send + Sync {
    /// Validate and stage an unverified registered hospital.
    async fn save_unverified_hospital(
        &self,
        attrs: HospitalAttributes,
    ) -> RegistrationResult<UnverifiedRegisteredHospital>;

    /// Validate and stage an unclaimed hospital.
    async fn save_unclaimed_hospital(
        &self,
        attrs: HospitalAttributes,
    ) -> RegistrationResult<UnclaimedHospital>;

    /// Number of staged writes not yet committed or rolled back.
    fn pending_operations(&self) -> usize;
}

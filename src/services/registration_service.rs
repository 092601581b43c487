//! Domain service routing a built hospital to its persistence path.

use crate::domain::{
    HospitalAttributes, HospitalEntity, UnclaimedHospital, UnverifiedRegisteredHospital,
};
use crate::error::RegistrationResult;
use crate::repositories::{scoped, UnitOfWorkFactory};

/// Registers hospital aggregates through a unit of work.
///
/// Every registration opens exactly one unit of work and makes exactly one
/// repository save call inside it.
pub struct RegisterHospitalService;

impl RegisterHospitalService {
    /// Build a hospital aggregate from candidate attributes.
    pub fn build_hospital_factory(attrs: HospitalAttributes) -> RegistrationResult<HospitalEntity> {
        HospitalEntity::build_factory(attrs)
    }

    /// Persist `hospital` using the save operation for its variant.
    pub async fn register_hospital(
        uow_factory: &dyn UnitOfWorkFactory,
        hospital: HospitalEntity,
    ) -> RegistrationResult<HospitalEntity> {
        match hospital {
            HospitalEntity::Unclaimed(hospital) => {
                Self::register_unclaimed_hospital(uow_factory, hospital)
                    .await
                    .map(HospitalEntity::from)
            }
            HospitalEntity::UnverifiedRegistered(hospital) => {
                Self::register_unverified_hospital(uow_factory, hospital)
                    .await
                    .map(HospitalEntity::from)
            }
        }
    }

    pub async fn register_unverified_hospital(
        uow_factory: &dyn UnitOfWorkFactory,
        hospital: UnverifiedRegisteredHospital,
    ) -> RegistrationResult<UnverifiedRegisteredHospital> {
        let attrs = HospitalEntity::from(hospital).to_attributes();
        let mut uow = uow_factory.create();

        scoped(uow.as_mut(), |repository| async move {
            repository.save_unverified_hospital(attrs).await
        })
        .await
    }

    pub async fn register_unclaimed_hospital(
        uow_factory: &dyn UnitOfWorkFactory,
        hospital: UnclaimedHospital,
    ) -> RegistrationResult<UnclaimedHospital> {
        let attrs = HospitalEntity::from(hospital).to_attributes();
        let mut uow = uow_factory.create();

        scoped(uow.as_mut(), |repository| async move {
            repository.save_unclaimed_hospital(attrs).await
        })
        .await
    }
}

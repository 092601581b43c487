//! Hospital registration use case.
//!
//! Validates an inbound [`HospitalRegistrationEntry`], translates it into
//! aggregate attributes, builds the aggregate and hands it to
//! [`RegisterHospitalService`].

use super::RegisterHospitalService;
use crate::domain::{
    ContactPerson, EmailAddress, HospitalAttributes, HospitalEntity, HospitalKind, PhoneNumber,
    ValidationError,
};
use crate::error::{RegistrationError, RegistrationResult};
use crate::models::{HospitalRegistrationEntry, RegisterKeyContact};
use crate::repositories::UnitOfWorkFactory;
use async_trait::async_trait;
use std::sync::Arc;

/// Hospital registration service trait.
#[async_trait]
pub trait HospitalRegistrationService: Send + Sync {
    /// Register a hospital and return the persisted aggregate.
    async fn register_hospital(
        &self,
        entry: HospitalRegistrationEntry,
    ) -> RegistrationResult<HospitalEntity>;
}

/// Default implementation of HospitalRegistrationService.
pub struct HospitalRegistrationServiceImpl {
    uow_factory: Arc<dyn UnitOfWorkFactory>,
}

impl HospitalRegistrationServiceImpl {
    pub fn new(uow_factory: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { uow_factory }
    }

    /// Translate a validated entry into aggregate attributes.
    pub fn to_attributes(
        entry: HospitalRegistrationEntry,
    ) -> RegistrationResult<HospitalAttributes> {
        let ownership_type = entry.parsed_ownership_type()?;
        let verified_status = entry.parsed_verified_status()?;
        let added_since = entry.parsed_added_since()?;

        let model = match verified_status {
            Some(status) if status.can_be_verified() => HospitalKind::Unclaimed,
            _ => HospitalKind::UnverifiedRegistered,
        };
        let invalid = move |field: &'static str| {
            move |e: ValidationError| RegistrationError::InvalidFieldValue {
                model,
                field,
                reason: e.to_string(),
            }
        };

        let phone_number =
            PhoneNumber::new(entry.hospital_contact_number).map_err(invalid("phone_number"))?;

        let key_contact_registrar = entry
            .key_contact
            .map(|RegisterKeyContact { name, mobile, email }| {
                let mobile = PhoneNumber::new(mobile).map_err(invalid("key_contact_registrar"))?;
                let email = email
                    .map(EmailAddress::new)
                    .transpose()
                    .map_err(invalid("key_contact_registrar"))?;
                Ok::<_, RegistrationError>(ContactPerson::new(name, mobile, email))
            })
            .transpose()?;

        Ok(HospitalAttributes {
            hospital_id: None,
            hospital_name: Some(entry.name),
            ownership_type: Some(ownership_type),
            address: Some(entry.address),
            phone_number: Some(phone_number),
            geo_location: entry.geo_location,
            added_since,
            verified_status,
            key_contact_registrar,
        })
    }
}

#[async_trait]
impl HospitalRegistrationService for HospitalRegistrationServiceImpl {
    async fn register_hospital(
        &self,
        entry: HospitalRegistrationEntry,
    ) -> RegistrationResult<HospitalEntity> {
        tracing::info!(name = %entry.name, "Registering hospital");

        entry.validate()?;
        let attrs = Self::to_attributes(entry)?;
        let hospital = RegisterHospitalService::build_hospital_factory(attrs)?;

        let registered =
            RegisterHospitalService::register_hospital(self.uow_factory.as_ref(), hospital)
                .await?;

        tracing::info!(
            hospital_id = %registered.entry().hospital_id(),
            kind = %registered.kind(),
            "Hospital registered"
        );
        Ok(registered)
    }
}

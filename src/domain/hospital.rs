//! Hospital registration aggregate.
//!
//! A registration entry is exactly one of two variants:
//!
//! - [`UnverifiedRegisteredHospital`]: self-registered by a named key contact,
//!   not yet verified.
//! - [`UnclaimedHospital`]: known from another source with a verification
//!   status, but claimed by nobody.
//!
//! [`HospitalEntity::build_factory`] is the only way to construct either one.

use super::address::{Address, GeoLocation};
use super::contact_person::ContactPerson;
use super::ownership_type::OwnershipType;
use super::phone::PhoneNumber;
use super::verification_status::VerificationStatus;
use crate::error::{RegistrationError, RegistrationResult};
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// Discriminant of [`HospitalEntity`], used to tag errors with the target model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HospitalKind {
    Unclaimed,
    UnverifiedRegistered,
}

impl HospitalKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Unclaimed => "UnclaimedHospital",
            Self::UnverifiedRegistered => "UnverifiedRegisteredHospital",
        }
    }

    /// Table (or collection) the variant is persisted to.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Unclaimed => "unclaimed_hospital",
            Self::UnverifiedRegistered => "unverified_hospital",
        }
    }
}

impl fmt::Display for HospitalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Flat set of candidate attributes for building a hospital aggregate.
///
/// `hospital_id` and `added_since` are normally left empty and generated by
/// the factory; a repository re-validating an already built aggregate passes
/// them through so the identity does not change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HospitalAttributes {
    pub hospital_id: Option<Uuid>,
    pub hospital_name: Option<String>,
    pub ownership_type: Option<OwnershipType>,
    pub address: Option<Address>,
    pub phone_number: Option<PhoneNumber>,
    pub geo_location: Option<GeoLocation>,
    pub added_since: Option<DateTime<Utc>>,
    pub verified_status: Option<VerificationStatus>,
    pub key_contact_registrar: Option<ContactPerson>,
}

impl HospitalAttributes {
    /// The variant these attributes would build.
    pub fn target_kind(&self) -> HospitalKind {
        match self.verified_status {
            Some(status) if status.can_be_verified() => HospitalKind::Unclaimed,
            _ => HospitalKind::UnverifiedRegistered,
        }
    }
}

/// Fields shared by both hospital variants. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct HospitalEntry {
    hospital_id: Uuid,
    hospital_name: String,
    ownership_type: Option<OwnershipType>,
    address: Address,
    phone_number: PhoneNumber,
    geo_location: Option<GeoLocation>,
    added_since: DateTime<Utc>,
}

impl HospitalEntry {
    pub fn hospital_id(&self) -> Uuid {
        self.hospital_id
    }

    pub fn hospital_name(&self) -> &str {
        &self.hospital_name
    }

    pub fn ownership_type(&self) -> Option<OwnershipType> {
        self.ownership_type
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }

    pub fn geo_location(&self) -> Option<GeoLocation> {
        self.geo_location
    }

    pub fn added_since(&self) -> DateTime<Utc> {
        self.added_since
    }
}

/// A hospital manually registered by a key contact, pending verification.
#[derive(Debug, Clone, PartialEq)]
pub struct UnverifiedRegisteredHospital {
    entry: HospitalEntry,
    key_contact_registrar: ContactPerson,
}

impl UnverifiedRegisteredHospital {
    pub fn entry(&self) -> &HospitalEntry {
        &self.entry
    }

    pub fn key_contact_registrar(&self) -> &ContactPerson {
        &self.key_contact_registrar
    }
}

/// A hospital imported from another source that nobody has claimed yet.
#[derive(Debug, Clone, PartialEq)]
pub struct UnclaimedHospital {
    entry: HospitalEntry,
    verified_status: VerificationStatus,
}

impl UnclaimedHospital {
    pub fn entry(&self) -> &HospitalEntry {
        &self.entry
    }

    pub fn verified_status(&self) -> VerificationStatus {
        self.verified_status
    }
}

/// A hospital registration aggregate.
#[derive(Debug, Clone, PartialEq)]
pub enum HospitalEntity {
    Unclaimed(UnclaimedHospital),
    UnverifiedRegistered(UnverifiedRegisteredHospital),
}

impl HospitalEntity {
    /// Build exactly one hospital variant from a set of candidate attributes.
    ///
    /// A `verified` or `verification_pending` status selects
    /// [`UnclaimedHospital`]; anything else requires a key contact and selects
    /// [`UnverifiedRegisteredHospital`].
    ///
    /// # Errors
    ///
    /// - `MissingField` naming absent base fields (checked first), or naming
    ///   `key_contact_registrar` when no verification status qualifies.
    /// - `InvalidFieldValue` when an unclaimed hospital is also given a key
    ///   contact, or the address fails validation.
    pub fn build_factory(attrs: HospitalAttributes) -> RegistrationResult<Self> {
        let kind = attrs.target_kind();
        let HospitalAttributes {
            hospital_id,
            hospital_name,
            ownership_type,
            address,
            phone_number,
            geo_location,
            added_since,
            verified_status,
            key_contact_registrar,
        } = attrs;

        let (hospital_name, address, phone_number) = match (hospital_name, address, phone_number)
        {
            (Some(name), Some(address), Some(phone)) => (name, address, phone),
            (name, address, phone) => {
                let fields = [
                    ("hospital_name", name.is_none()),
                    ("address", address.is_none()),
                    ("phone_number", phone.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, missing)| missing.then_some(field))
                .collect();
                return Err(RegistrationError::MissingField { fields, model: kind });
            }
        };

        address
            .validate()
            .map_err(|e| RegistrationError::InvalidFieldValue {
                model: kind,
                field: "address",
                reason: e.to_string(),
            })?;

        let entry = HospitalEntry {
            hospital_id: hospital_id.unwrap_or_else(Uuid::new_v4),
            hospital_name,
            ownership_type,
            address,
            phone_number,
            geo_location,
            added_since: added_since.unwrap_or_else(Utc::now),
        };

        match verified_status.filter(VerificationStatus::can_be_verified) {
            Some(verified_status) => match key_contact_registrar {
                None => Ok(Self::Unclaimed(UnclaimedHospital {
                    entry,
                    verified_status,
                })),
                Some(_) => Err(RegistrationError::InvalidFieldValue {
                    model: HospitalKind::Unclaimed,
                    field: "key_contact_registrar",
                    reason: format!(
                        "a hospital with verification status {} cannot also have a key contact",
                        verified_status
                    ),
                }),
            },
            None => match key_contact_registrar {
                Some(key_contact_registrar) => {
                    Ok(Self::UnverifiedRegistered(UnverifiedRegisteredHospital {
                        entry,
                        key_contact_registrar,
                    }))
                }
                None => Err(RegistrationError::MissingField {
                    fields: vec!["key_contact_registrar"],
                    model: HospitalKind::UnverifiedRegistered,
                }),
            },
        }
    }

    pub fn kind(&self) -> HospitalKind {
        match self {
            Self::Unclaimed(_) => HospitalKind::Unclaimed,
            Self::UnverifiedRegistered(_) => HospitalKind::UnverifiedRegistered,
        }
    }

    pub fn entry(&self) -> &HospitalEntry {
        match self {
            Self::Unclaimed(hospital) => hospital.entry(),
            Self::UnverifiedRegistered(hospital) => hospital.entry(),
        }
    }

    /// Flatten back into attributes, keeping identity and timestamp.
    pub fn to_attributes(&self) -> HospitalAttributes {
        let entry = self.entry();
        let (verified_status, key_contact_registrar) = match self {
            Self::Unclaimed(hospital) => (Some(hospital.verified_status), None),
            Self::UnverifiedRegistered(hospital) => {
                (None, Some(hospital.key_contact_registrar.clone()))
            }
        };

        HospitalAttributes {
            hospital_id: Some(entry.hospital_id),
            hospital_name: Some(entry.hospital_name.clone()),
            ownership_type: entry.ownership_type,
            address: Some(entry.address.clone()),
            phone_number: Some(entry.phone_number.clone()),
            geo_location: entry.geo_location,
            added_since: Some(entry.added_since),
            verified_status,
            key_contact_registrar,
        }
    }

    /// Unwrap the unclaimed variant or fail with `VariantMismatch`.
    pub fn into_unclaimed(self) -> RegistrationResult<UnclaimedHospital> {
        match self {
            Self::Unclaimed(hospital) => Ok(hospital),
            other => Err(RegistrationError::VariantMismatch {
                expected: HospitalKind::Unclaimed,
                actual: other.kind(),
            }),
        }
    }

    /// Unwrap the unverified registered variant or fail with `VariantMismatch`.
    pub fn into_unverified_registered(self) -> RegistrationResult<UnverifiedRegisteredHospital> {
        match self {
            Self::UnverifiedRegistered(hospital) => Ok(hospital),
            other => Err(RegistrationError::VariantMismatch {
                expected: HospitalKind::UnverifiedRegistered,
                actual: other.kind(),
            }),
        }
    }
}

impl From<UnclaimedHospital> for HospitalEntity {
    fn from(hospital: UnclaimedHospital) -> Self {
        Self::Unclaimed(hospital)
    }
}

impl From<UnverifiedRegisteredHospital> for HospitalEntity {
    fn from(hospital: UnverifiedRegisteredHospital) -> Self {
        Self::UnverifiedRegistered(hospital)
    }
}

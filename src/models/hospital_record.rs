//! Persisted hospital record.

use crate::domain::{
    Address, ContactPerson, GeoLocation, HospitalEntity, OwnershipType, VerificationStatus,
};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

/// A hospital as written to a backing store.
///
/// Carries exactly one of `key_contact_registrar` or `verified_status`,
/// depending on the variant it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalRecord {
    /// Hospital id as a 32 character hex string
    pub id: String,

    pub name: String,

    pub address: Address,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ownership_type: Option<OwnershipType>,

    pub contact_number: String,

    /// ISO 8601 timestamp with millisecond precision
    pub added_since: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<GeoLocation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_contact_registrar: Option<ContactPerson>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_status: Option<VerificationStatus>,
}

impl From<&HospitalEntity> for HospitalRecord {
    fn from(hospital: &HospitalEntity) -> Self {
        let entry = hospital.entry();
        let (key_contact_registrar, verified_status) = match hospital {
            HospitalEntity::UnverifiedRegistered(h) => {
                (Some(h.key_contact_registrar().clone()), None)
            }
            HospitalEntity::Unclaimed(h) => (None, Some(h.verified_status())),
        };

        Self {
            id: entry.hospital_id().simple().to_string(),
            name: entry.hospital_name().to_string(),
            address: entry.address().clone(),
            ownership_type: entry.ownership_type(),
            contact_number: entry.phone_number().as_str().to_string(),
            added_since: entry
                .added_since()
                .to_rfc3339_opts(SecondsFormat::Millis, false),
            geo_location: entry.geo_location(),
            key_contact_registrar,
            verified_status,
        }
    }
}

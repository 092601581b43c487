//! Shared test data.

#![allow(dead_code)]

use hospital_registry::domain::{
    Address, ContactPerson, EmailAddress, HospitalAttributes, OwnershipType, PhoneNumber,
    VerificationStatus,
};
use hospital_registry::models::{HospitalRegistrationEntry, RegisterKeyContact};

pub fn address() -> Address {
    Address {
        street: "Ansari Nagar".to_string(),
        street2: Some("Sri Aurobindo Marg".to_string()),
        city: "New Delhi".to_string(),
        state: "DL".to_string(),
        country: "IN".to_string(),
    }
}

pub fn key_contact() -> ContactPerson {
    ContactPerson::new(
        "Radhe Shyam",
        PhoneNumber::new("+919425416789").unwrap(),
        Some(EmailAddress::new("radhe@example.com").unwrap()),
    )
}

/// Base attributes without either variant field.
pub fn base_attributes() -> HospitalAttributes {
    HospitalAttributes {
        hospital_name: Some("A hospital".to_string()),
        ownership_type: Some(OwnershipType::Public),
        address: Some(address()),
        phone_number: Some(PhoneNumber::new("+919425411234").unwrap()),
        ..Default::default()
    }
}

pub fn unclaimed_attributes(status: VerificationStatus) -> HospitalAttributes {
    HospitalAttributes {
        verified_status: Some(status),
        ..base_attributes()
    }
}

pub fn registered_attributes() -> HospitalAttributes {
    HospitalAttributes {
        key_contact_registrar: Some(key_contact()),
        ..base_attributes()
    }
}

/// The self-registration request used throughout the request tests.
pub fn registration_entry() -> HospitalRegistrationEntry {
    HospitalRegistrationEntry {
        name: "A hospital".to_string(),
        ownership_type: "public".to_string(),
        hospital_contact_number: "+919425411234".to_string(),
        key_contact: Some(RegisterKeyContact {
            name: "Radhe Shyam".to_string(),
            mobile: "+919425416789".to_string(),
            email: None,
        }),
        verified_status: Some("unverified".to_string()),
        address: address(),
        geo_location: None,
        added_since: None,
    }
}

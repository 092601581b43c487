//! Domain value objects and the hospital aggregate.
//!
//! Value objects validate at construction time so an invalid phone number,
//! email address, or enumeration value can never be represented. The
//! [`hospital`] module holds the registration aggregate and its factory.

pub mod address;
pub mod contact_person;
pub mod email;
pub mod errors;
pub mod hospital;
pub mod ownership_type;
pub mod phone;
pub mod verification_status;

pub use address::{Address, GeoLocation};
pub use contact_person::ContactPerson;
pub use email::EmailAddress;
pub use errors::ValidationError;
pub use hospital::{
    HospitalAttributes, HospitalEntity, HospitalEntry, HospitalKind, UnclaimedHospital,
    UnverifiedRegisteredHospital,
};
pub use ownership_type::OwnershipType;
pub use phone::PhoneNumber;
pub use verification_status::VerificationStatus;

//! Data transfer types at the edges of the registry.
//!
//! [`HospitalRegistrationEntry`] is what callers submit; [`HospitalRecord`] is
//! what storage adapters persist.

pub mod hospital_record;
pub mod registration;

pub use hospital_record::HospitalRecord;
pub use registration::{parse_added_since, HospitalRegistrationEntry, RegisterKeyContact};

//! Service layer.
//!
//! [`RegisterHospitalService`] dispatches built aggregates to the repository
//! inside a unit of work. [`HospitalRegistrationService`] is the use case the
//! MCP handlers call: it validates requests and drives the domain service.

mod application_service;
mod registration_service;

pub use application_service::{HospitalRegistrationService, HospitalRegistrationServiceImpl};
pub use registration_service::RegisterHospitalService;

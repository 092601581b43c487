//! Persistence ports and storage adapters.

mod m3o_repository;
mod memory_repository;
mod traits;
pub mod unit_of_work;

pub use m3o_repository::{
    duplicate_query, M3oHospitalRepository, M3oUnitOfWork, M3oUnitOfWorkFactory,
};
pub use memory_repository::{
    InMemoryHospitalRepository, InMemoryStore, InMemoryUnitOfWork, InMemoryUnitOfWorkFactory,
};
pub use traits::HospitalRepository;
pub use unit_of_work::{scoped, UnitOfWork, UnitOfWorkFactory, UowSessionFlag, UowState};

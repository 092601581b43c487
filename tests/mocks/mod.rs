pub mod mock_unit_of_work;

#[allow(unused_imports)]
pub use mock_unit_of_work::{CallLog, MockHospitalRepository, MockUnitOfWork, MockUnitOfWorkFactory};

//! HR vertical slice: employees, worked hours and derived salaries.
//!
//! [`HrStore`] owns the two in-memory lists and implements every operation
//! synchronously. [`HrModule`] is the cloneable, lock-guarded handle the
//! HTTP layer shares between requests.

mod error;
mod model;
mod module;
mod store;

pub use error::{HrError, HrResult};
pub use model::{Employee, EmployeeId, EmployeeUpdate, Salary, WorkedHours};
pub use module::HrModule;
pub use store::{Deletion, HrStore};

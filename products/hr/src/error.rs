use platform_api::ApiError;
use thiserror::Error;

use crate::EmployeeId;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HrError {
    #[error("Empleado no encontrado")]
    EmployeeNotFound(EmployeeId),
    /// A path segment that cannot name any employee.
    #[error("Empleado no encontrado")]
    InvalidEmployeeRef(String),
}

impl From<HrError> for ApiError {
    fn from(err: HrError) -> Self {
        match err {
            HrError::EmployeeNotFound(_) | HrError::InvalidEmployeeRef(_) => {
                ApiError::not_found(err.to_string())
            }
        }
    }
}

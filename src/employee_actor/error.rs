//! Error types for the Employee actor.

use crate::model::EmployeeId;
use thiserror::Error;

/// Validation failures for employee payloads.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EmployeeError {
    #[error("Employee name must not be empty")]
    EmptyName,

    #[error("Salary must be a non-negative number, got {0}")]
    InvalidSalary(f64),

    #[error("Age must be a non-negative number, got {0}")]
    InvalidAge(f64),

    #[error("Employee id {found} does not match {expected}")]
    IdMismatch {
        expected: EmployeeId,
        found: EmployeeId,
    },
}

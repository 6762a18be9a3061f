//! # Employee Actor
//!
//! The `/employees` collection: [`Employee`] records keyed by a numeric
//! [`EmployeeId`](crate::model::EmployeeId). The default configuration draws
//! random identifiers and ignores any identifier a client sends.

pub mod entity;
pub mod error;

pub use error::*;

use crate::framework::{ClientIds, IdAssignment, IdPolicy, ResourceActor, ResourceClient};
use crate::model::Employee;

/// Handle to the `/employees` collection.
pub type EmployeeClient = ResourceClient<Employee>;

/// Creates a new Employee actor and its client.
pub fn new(
    mailbox_size: usize,
    assignment: IdAssignment,
) -> (ResourceActor<Employee>, EmployeeClient) {
    ResourceActor::new(mailbox_size, assignment)
}

/// Random identifiers below ten million, client identifiers discarded.
pub fn default_assignment() -> IdAssignment {
    IdAssignment::new(IdPolicy::Random { upper: 10_000_000 }, ClientIds::Ignore)
}

//! # Entity Trait
//!
//! The `Entity` trait defines the contract every record type (Book, Employee, …)
//! implements to be managed by the generic `ResourceActor`. It names the
//! identifier type, the create and update DTOs, and the validation error, and
//! provides the hooks the actor calls while executing CRUD requests.
//!
//! # Architecture Note
//! By defining this contract once, the `ResourceActor` logic is written once and
//! reused for every collection. Associated types keep the payloads apart: a
//! `Book` collection only accepts `BookCreate`, and the compiler rejects an
//! `EmployeeCreate` sent to it.

use crate::framework::id::RecordId;
use std::fmt::Debug;

/// Trait that any record type must implement to be managed by ResourceActor.
///
/// # Update Semantics
/// `apply_update` receives a patch in which only the fields the caller sent are
/// present. Absent fields keep their stored value, and the identifier never
/// changes. The actor applies the patch to a copy of the record and stores the
/// copy only if the hook succeeds, so a rejected patch leaves no trace.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// The unique identifier for this record (e.g., String, a numeric newtype).
    type Id: RecordId;

    /// The data required to create a new instance (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug;

    /// A partial record; `None` fields are left untouched.
    type Update: Send + Sync + Debug;

    /// Validation error raised by the hooks below.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier of this record.
    fn id(&self) -> &Self::Id;

    /// The identifier the caller asked for on create, if any.
    ///
    /// Whether it is honoured depends on the collection's
    /// [`ClientIds`](crate::framework::ClientIds) rule.
    fn requested_id(_params: &Self::Create) -> Option<Self::Id> {
        None
    }

    /// Construct the full record from the assigned ID and the payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Apply a patch in place.
    fn apply_update(&mut self, update: Self::Update) -> Result<(), Self::Error>;

    /// Called immediately before the record is removed. Returning an error
    /// vetoes the delete.
    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}

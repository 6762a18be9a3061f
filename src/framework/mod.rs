//! Generic actor framework for resource collections.
//!
//! This module provides the building blocks for serving keyed, ordered
//! collections of records with linearizable CRUD operations.
//!
//! # Main Components
//!
//! - [`Entity`] - Trait that record types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns one collection
//! - [`ResourceClient`] - Cloneable handle for sending requests to an actor
//! - [`RecordStore`] - Persistence seam, with [`MemoryStore`] as the in-process backend
//! - [`IdPolicy`] / [`IdAssignment`] - How fresh identifiers are produced
//! - [`FrameworkError`] - The error kinds every operation resolves to
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod id;
pub mod message;
pub mod mock;
pub mod store;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::Entity;
pub use error::{FrameworkError, StoreError};
pub use id::{ClientIds, IdAssignment, IdGenerator, IdPolicy, RecordId};
pub use message::{RequestOptions, ResourceRequest, Response};
pub use store::{MemoryStore, RecordStore};

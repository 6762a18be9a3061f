//! Pure data structures (records and their DTOs) managed by the collections.
//!
//! The [`Entity`](crate::framework::Entity) implementations live next to each
//! collection's actor: see [`crate::book_actor`] and [`crate::employee_actor`].

pub mod book;
pub mod employee;

pub use book::*;
pub use employee::*;

//! # Book Actor
//!
//! This module wires the `/books` collection: a [`ResourceActor`] over [`Book`]
//! records with string identifiers.
//!
//! ## Structure
//!
//! - [`entity`] - [`Entity`](crate::framework::Entity) implementation for [`Book`]
//! - [`error`] - [`BookError`] validation failures
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use crud_recipe::book_actor;
//! use crud_recipe::framework::IdAssignment;
//! use crud_recipe::model::BookCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = book_actor::new(32, IdAssignment::default());
//!     tokio::spawn(actor.run());
//!
//!     let book = client.create(BookCreate::new("1234", "Book Title 1")).await?;
//!     assert_eq!(book.id, "1");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::framework::{IdAssignment, ResourceActor, ResourceClient};
use crate::model::{Book, BookCreate};

/// Handle to the `/books` collection.
pub type BookClient = ResourceClient<Book>;

/// Creates a new Book actor and its client.
pub fn new(mailbox_size: usize, assignment: IdAssignment) -> (ResourceActor<Book>, BookClient) {
    ResourceActor::new(mailbox_size, assignment)
}

/// The two books every fresh demo server starts with.
pub fn demo_books() -> Vec<BookCreate> {
    vec![
        BookCreate::new("1234", "Book Title 1")
            .with_id("1")
            .with_author("author 1", 1),
        BookCreate::new("1235", "Book Title 2")
            .with_id("2")
            .with_author("author 2", 2),
    ]
}

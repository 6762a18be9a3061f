//! Error types for the Book actor.

use thiserror::Error;

/// Validation failures for book payloads.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BookError {
    #[error("Book title must not be empty")]
    EmptyTitle,

    /// The requested id is blank or cannot appear as a single path segment.
    #[error("Invalid book id: {0:?}")]
    InvalidId(String),

    /// ISBNs are digits, optionally separated by hyphens, with a trailing `X` check digit allowed.
    #[error("Invalid ISBN: {0:?}")]
    InvalidIsbn(String),

    /// The patch named a different book than the one addressed.
    #[error("Book id {found} does not match {expected}")]
    IdMismatch { expected: String, found: String },
}

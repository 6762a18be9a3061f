//! # Framework Errors
//!
//! This module defines the error types shared by every collection. Each
//! collection operation resolves to exactly one of these kinds, so the
//! HTTP layer can map them to status codes without knowing the entity type.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Identifier already in use: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    InvalidInput(Box<dyn std::error::Error + Send + Sync>),
    #[error("Deadline exceeded")]
    Timeout,
    #[error("Request canceled")]
    Canceled,
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("No free identifier after {0} attempts")]
    IdExhausted(usize),
}

impl FrameworkError {
    /// Wraps an entity validation error.
    pub fn invalid<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        FrameworkError::InvalidInput(Box::new(error))
    }
}

/// Errors reported by a [`RecordStore`](crate::framework::RecordStore) implementation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached or failed mid-operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// An insert hit a key that is already present.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// A replace or remove named a key that is absent.
    #[error("missing key: {0}")]
    MissingKey(String),
}

impl From<StoreError> for FrameworkError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(reason) => FrameworkError::StoreUnavailable(reason),
            StoreError::DuplicateKey(key) => FrameworkError::Conflict(key),
            StoreError::MissingKey(key) => FrameworkError::NotFound(key),
        }
    }
}

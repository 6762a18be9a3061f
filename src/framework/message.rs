//! # Generic Messages
//!
//! This module defines the request type exchanged between a `ResourceClient`
//! and its `ResourceActor`, plus the per-request deadline/cancellation options.

use crate::framework::entity::Entity;
use crate::framework::error::FrameworkError;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Deadline and cancellation signal carried by every request.
///
/// When the deadline passes or the token fires, the actor abandons the
/// in-flight store call and answers `Timeout` or `Canceled`. Dropping the
/// client future has the same effect as cancelling.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub deadline: Option<Instant>,
    pub cancel: Option<CancellationToken>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Resolves when the deadline passes; never resolves without one.
    pub(crate) async fn expired(&self) {
        match self.deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending::<()>().await,
        }
    }

    /// Resolves when the token fires; never resolves without one.
    pub(crate) async fn cancelled(&self) {
        match &self.cancel {
            Some(token) => token.cancelled().await,
            None => std::future::pending::<()>().await,
        }
    }
}

/// Internal message type sent to the actor to request operations.
///
/// # The CRUD Pattern
/// The variants map directly to the collection operations:
///
/// - **List**: every current record, in insertion order.
/// - **Get (Read)**: one record by ID, or `NotFound`.
/// - **Create**: assigns an ID and stores a record built from [`Entity::Create`].
/// - **Update**: applies an [`Entity::Update`] patch and returns the new state.
/// - **Delete**: removes a record and returns it.
///
/// Every variant is generic over `T: Entity`, so a payload for one record type
/// can never reach the collection of another.
#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    List {
        options: RequestOptions,
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        options: RequestOptions,
        respond_to: Response<T>,
    },
    Create {
        params: T::Create,
        options: RequestOptions,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        options: RequestOptions,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        options: RequestOptions,
        respond_to: Response<T>,
    },
}

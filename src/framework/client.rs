//! # Generic Client
//!
//! This module defines the generic client for communicating with a collection actor.

use crate::framework::entity::Entity;
use crate::framework::error::FrameworkError;
use crate::framework::message::{RequestOptions, ResourceRequest, Response};
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `ResourceActor`.
///
/// The `ResourceClient<T>` provides an async API over the five collection
/// operations. It forwards requests over a Tokio mpsc channel and receives
/// results via oneshot channels. The client holds only a sender, so it is cheap
/// to clone and share across request handlers.
///
/// Each operation has a `*_with` variant taking [`RequestOptions`]. The client
/// stops waiting when the deadline passes (`Timeout`) or the token fires
/// (`Canceled`); dropping the wait also tells the actor to abandon the request.
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.list_with(RequestOptions::default()).await
    }

    pub async fn list_with(&self, options: RequestOptions) -> Result<Vec<T>, FrameworkError> {
        let message_options = options.clone();
        self.request(&options, |respond_to| ResourceRequest::List {
            options: message_options,
            respond_to,
        })
        .await
    }

    pub async fn get(&self, id: T::Id) -> Result<T, FrameworkError> {
        self.get_with(id, RequestOptions::default()).await
    }

    pub async fn get_with(&self, id: T::Id, options: RequestOptions) -> Result<T, FrameworkError> {
        let message_options = options.clone();
        self.request(&options, |respond_to| ResourceRequest::Get {
            id,
            options: message_options,
            respond_to,
        })
        .await
    }

    pub async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        self.create_with(params, RequestOptions::default()).await
    }

    pub async fn create_with(
        &self,
        params: T::Create,
        options: RequestOptions,
    ) -> Result<T, FrameworkError> {
        let message_options = options.clone();
        self.request(&options, |respond_to| ResourceRequest::Create {
            params,
            options: message_options,
            respond_to,
        })
        .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.update_with(id, update, RequestOptions::default()).await
    }

    pub async fn update_with(
        &self,
        id: T::Id,
        update: T::Update,
        options: RequestOptions,
    ) -> Result<T, FrameworkError> {
        let message_options = options.clone();
        self.request(&options, |respond_to| ResourceRequest::Update {
            id,
            update,
            options: message_options,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<T, FrameworkError> {
        self.delete_with(id, RequestOptions::default()).await
    }

    pub async fn delete_with(
        &self,
        id: T::Id,
        options: RequestOptions,
    ) -> Result<T, FrameworkError> {
        let message_options = options.clone();
        self.request(&options, |respond_to| ResourceRequest::Delete {
            id,
            options: message_options,
            respond_to,
        })
        .await
    }

    async fn request<R>(
        &self,
        options: &RequestOptions,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        let exchange = async {
            self.sender
                .send(build(respond_to))
                .await
                .map_err(|_| FrameworkError::ActorClosed)?;
            response.await.map_err(|_| FrameworkError::ActorDropped)?
        };

        tokio::select! {
            biased;
            _ = options.cancelled() => Err(FrameworkError::Canceled),
            _ = options.expired() => Err(FrameworkError::Timeout),
            result = exchange => result,
        }
    }
}

//! # Mock Framework
//!
//! Utilities for testing code that talks to a collection, without the real actor.
//!
//! - [`MockClient`] answers requests from a script of expectations.
//! - [`create_mock_client`] hands you the raw receiver; helpers like
//!   [`expect_create`] pull the next request off it so the test can answer by hand.
//! - [`FaultyStore`] wraps a [`MemoryStore`] and injects latency or outages, for
//!   driving a real `ResourceActor` into `Timeout` and `StoreUnavailable`.

use crate::framework::entity::Entity;
use crate::framework::error::{FrameworkError, StoreError};
use crate::framework::message::{ResourceRequest, Response};
use crate::framework::store::{MemoryStore, RecordStore};
use crate::framework::ResourceClient;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client.
enum Expectation<T: Entity> {
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Get {
        response: Result<T, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    Update {
        response: Result<T, FrameworkError>,
    },
    Delete {
        response: Result<T, FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Requests are matched against expectations in FIFO order; a request of the
/// wrong kind panics the answering task, and the caller then sees
/// `ActorDropped`.
///
/// # Example
/// ```ignore
/// let mock = MockClient::<Book>::new();
/// mock.expect_get().return_err(FrameworkError::Timeout);
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: Entity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Entity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::List { respond_to, .. }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Update { respond_to, .. }, Some(Expectation::Update { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Delete { respond_to, .. }, Some(Expectation::Delete { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_list(&self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_get(&self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Get { response })
    }

    pub fn expect_create(&self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_update(&self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Update { response })
    }

    pub fn expect_delete(&self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Delete { response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn builder<R>(
        &self,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            wrap,
            expectations: self.expectations.clone(),
        }
    }
}

/// Builder finishing one expectation with its scripted response.
pub struct ExpectationBuilder<T: Entity, R> {
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    expectations: Expectations<T>,
}

impl<T: Entity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back((self.wrap)(response));
    }
}

// =============================================================================
// RAW RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// # Testing Strategy
/// Instead of spinning up a full `ResourceActor`, the test plays the actor: it
/// pulls each request off `receiver`, asserts on its contents, and answers on
/// the enclosed oneshot. This makes success, failure and delays deterministic.
///
/// **Note**: Consider using [`MockClient`] for a more fluent API.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create {
            params, respond_to, ..
        }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to, .. }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
            ..
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

// =============================================================================
// FAULT INJECTION
// =============================================================================

/// Switches shared between a [`FaultyStore`] and the test driving it.
#[derive(Debug, Clone, Default)]
pub struct FaultSwitch {
    outage: Arc<AtomicBool>,
}

impl FaultSwitch {
    /// Every store call fails with `StoreError::Unavailable` until `restore`.
    pub fn fail(&self) {
        self.outage.store(true, Ordering::SeqCst);
    }

    pub fn restore(&self) {
        self.outage.store(false, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.outage.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected outage".into()));
        }
        Ok(())
    }
}

/// A [`MemoryStore`] behind a slow, unreliable link.
pub struct FaultyStore<T: Entity> {
    inner: MemoryStore<T>,
    latency: Duration,
    switch: FaultSwitch,
}

impl<T: Entity> FaultyStore<T> {
    /// Wraps an empty store; every call sleeps `latency` before touching it.
    pub fn new(latency: Duration) -> (Self, FaultSwitch) {
        let switch = FaultSwitch::default();
        let store = Self {
            inner: MemoryStore::new(),
            latency,
            switch: switch.clone(),
        };
        (store, switch)
    }

    async fn delay(&self) -> Result<(), StoreError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.switch.check()
    }
}

#[async_trait]
impl<T: Entity> RecordStore<T> for FaultyStore<T> {
    async fn list(&self) -> Result<Vec<T>, StoreError> {
        self.delay().await?;
        self.inner.list().await
    }

    async fn get(&self, id: &T::Id) -> Result<Option<T>, StoreError> {
        self.delay().await?;
        self.inner.get(id).await
    }

    async fn insert(&mut self, id: T::Id, record: T) -> Result<(), StoreError> {
        self.delay().await?;
        self.inner.insert(id, record).await
    }

    async fn replace(&mut self, id: &T::Id, record: T) -> Result<(), StoreError> {
        self.delay().await?;
        self.inner.replace(id, record).await
    }

    async fn remove(&mut self, id: &T::Id) -> Result<T, StoreError> {
        self.delay().await?;
        self.inner.remove(id).await
    }

    async fn allocate_id(&mut self) -> Result<u64, StoreError> {
        self.delay().await?;
        self.inner.allocate_id().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Book, BookCreate, BookUpdate};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Book>(10);

        // Test Create
        let create_task =
            tokio::spawn(async move { client.create(BookCreate::new("1234", "Book Title 1")).await });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.title, "Book Title 1");
        responder
            .send(Ok(Book::new("7", "1234", "Book Title 1")))
            .unwrap();

        let result = create_task.await.unwrap().unwrap();
        assert_eq!(result.id, "7");
    }

    #[tokio::test]
    async fn test_mock_update_carries_patch() {
        let (client, mut receiver) = create_mock_client::<Book>(10);

        let update_task = tokio::spawn(async move {
            let patch = BookUpdate {
                title: Some("Renamed".into()),
                ..Default::default()
            };
            client.update("1".into(), patch).await
        });

        let (id, patch, responder) = expect_update(&mut receiver).await.unwrap();
        assert_eq!(id, "1");
        assert_eq!(patch.title.as_deref(), Some("Renamed"));
        assert!(patch.isbn.is_none());
        responder.send(Err(FrameworkError::NotFound(id))).unwrap();

        assert!(matches!(
            update_task.await.unwrap(),
            Err(FrameworkError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        // Create mock with fluent expectation API
        let mock = MockClient::<Book>::new();

        // Set up expectations
        mock.expect_create()
            .return_ok(Book::new("1", "1234", "Book Title 1"));
        mock.expect_get().return_err(FrameworkError::Timeout);
        mock.expect_list().return_ok(Vec::new());

        let client = mock.client();

        // Execute operations
        let book = client
            .create(BookCreate::new("1234", "Book Title 1"))
            .await
            .unwrap();
        assert_eq!(book.id, "1");
        assert!(matches!(
            client.get("1".into()).await,
            Err(FrameworkError::Timeout)
        ));
        assert!(client.list().await.unwrap().is_empty());

        // Verify all expectations were met
        mock.verify();
    }

    #[tokio::test]
    async fn test_faulty_store_outage() {
        let (mut store, switch) = FaultyStore::<Book>::new(Duration::ZERO);
        store
            .insert("1".into(), Book::new("1", "1234", "Book Title 1"))
            .await
            .unwrap();

        switch.fail();
        assert!(matches!(
            store.get(&"1".to_string()).await,
            Err(StoreError::Unavailable(_))
        ));

        switch.restore();
        assert!(store.get(&"1".to_string()).await.unwrap().is_some());
    }
}

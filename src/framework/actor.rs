//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns one
//! collection. It implements the "Server" side of the Actor Model: requests are
//! processed one at a time, which gives every operation exclusive access to the
//! store and makes the collection linearizable.

use crate::framework::client::ResourceClient;
use crate::framework::entity::Entity;
use crate::framework::error::FrameworkError;
use crate::framework::id::{ClientIds, IdAssignment, IdGenerator, RecordId};
use crate::framework::message::{RequestOptions, ResourceRequest, Response};
use crate::framework::store::{MemoryStore, RecordStore};
use std::collections::HashSet;
use std::future::Future;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Upper bound on random draws for a single create.
const MAX_ID_ATTEMPTS: usize = 1 << 16;

/// The generic actor that manages a collection of records.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the store and the
/// receiver end of the channel. Every `ResourceClient` clone feeds the same
/// mailbox, and the loop in [`run`](Self::run) drains it sequentially, so the
/// store needs no `Mutex`: the dequeue order is the serialization order of all
/// concurrent requests.
///
/// # Usage Pattern
///
/// 1. **Create**: call `ResourceActor::new()` to get the actor (server) and client (interface).
/// 2. **Run**: spawn `actor.run()` in a background task.
/// 3. **Use**: clone the client into whatever needs it.
///
/// ```rust
/// use crud_recipe::framework::{IdAssignment, ResourceActor};
/// use crud_recipe::model::{Book, BookCreate};
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Book>::new(16, IdAssignment::default());
///     tokio::spawn(actor.run());
///
///     let book = client
///         .create(BookCreate::new("1234", "Book Title 1"))
///         .await
///         .unwrap();
///     assert_eq!(book.id, "1");
/// }
/// ```
///
/// # Operations
///
/// * **Create**:
///     1. Honours the caller's ID if the collection accepts client IDs, else draws one.
///     2. Rejects an ID that is stored or was ever issued (`Conflict`).
///     3. Calls `T::from_create_params` to validate and build the record.
///     4. Inserts the record and remembers the ID as issued.
///
/// * **Update**:
///     1. Loads a copy of the record (`NotFound` if absent).
///     2. Calls `apply_update` on the copy.
///     3. Writes the copy back with one store call.
///
/// * **Delete**:
///     1. Loads the record and calls the `on_delete` hook.
///     2. Removes it and returns the removed record.
pub struct ResourceActor<T: Entity, S: RecordStore<T> = MemoryStore<T>> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: S,
    generator: IdGenerator,
    client_ids: ClientIds,
    /// Taken identifiers the generator has not already passed.
    issued: HashSet<T::Id>,
}

impl<T: Entity> ResourceActor<T> {
    /// Creates an actor backed by a fresh [`MemoryStore`], and its client.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client wait until there is space.
    /// * `assignment` - Identifier policy and client-ID rule for this collection.
    pub fn new(buffer_size: usize, assignment: IdAssignment) -> (Self, ResourceClient<T>) {
        Self::with_store(buffer_size, MemoryStore::new(), assignment)
    }
}

impl<T: Entity, S: RecordStore<T>> ResourceActor<T, S> {
    /// Creates an actor persisting through `store`, and its client.
    pub fn with_store(
        buffer_size: usize,
        store: S,
        assignment: IdAssignment,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store,
            generator: IdGenerator::from_policy(&assignment.policy),
            client_ids: assignment.client_ids,
            issued: HashSet::new(),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Book" instead of "crud_recipe::model::book::Book")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List {
                    options,
                    mut respond_to,
                } => {
                    let result = guarded(&options, &mut respond_to, self.list()).await;
                    match &result {
                        Ok(records) => debug!(entity_type, count = records.len(), "List"),
                        Err(e) => warn!(entity_type, error = %e, "List failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get {
                    id,
                    options,
                    mut respond_to,
                } => {
                    let result = guarded(&options, &mut respond_to, self.get(&id)).await;
                    debug!(entity_type, %id, found = result.is_ok(), "Get");
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Create {
                    params,
                    options,
                    mut respond_to,
                } => {
                    debug!(entity_type, ?params, "Create");
                    let result = guarded(&options, &mut respond_to, self.create(params)).await;
                    match &result {
                        Ok(record) => info!(entity_type, id = %record.id(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Update {
                    id,
                    update,
                    options,
                    mut respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = guarded(&options, &mut respond_to, self.update(&id, update)).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete {
                    id,
                    options,
                    mut respond_to,
                } => {
                    debug!(entity_type, %id, "Delete");
                    let result = guarded(&options, &mut respond_to, self.delete(&id)).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, issued = self.issued.len(), "Shutdown");
    }

    async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        Ok(self.store.list().await?)
    }

    async fn get(&self, id: &T::Id) -> Result<T, FrameworkError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))
    }

    async fn create(&mut self, params: T::Create) -> Result<T, FrameworkError> {
        let requested = match self.client_ids {
            ClientIds::Accept => T::requested_id(&params),
            ClientIds::Ignore => None,
        };
        let id = match requested {
            Some(id) => {
                if self.is_retired(&id) || self.store.contains(&id).await? {
                    return Err(FrameworkError::Conflict(id.to_string()));
                }
                id
            }
            None => self.next_free_id().await?,
        };

        let record = T::from_create_params(id.clone(), params).map_err(FrameworkError::invalid)?;
        self.store.insert(id.clone(), record.clone()).await?;
        if !self.generator_passed(&id) {
            self.issued.insert(id);
        }
        Ok(record)
    }

    async fn update(&mut self, id: &T::Id, update: T::Update) -> Result<T, FrameworkError> {
        let mut record = self.get(id).await?;
        record.apply_update(update).map_err(FrameworkError::invalid)?;
        self.store.replace(id, record.clone()).await?;
        Ok(record)
    }

    async fn delete(&mut self, id: &T::Id) -> Result<T, FrameworkError> {
        let record = self.get(id).await?;
        record.on_delete().map_err(FrameworkError::invalid)?;
        Ok(self.store.remove(id).await?)
    }

    fn generator_passed(&self, id: &T::Id) -> bool {
        id.to_generated()
            .is_some_and(|value| self.generator.has_passed(value))
    }

    fn is_retired(&self, id: &T::Id) -> bool {
        self.generator_passed(id) || self.issued.contains(id)
    }

    /// Draws identifiers until one is neither stored nor previously issued.
    ///
    /// Only random draws are capped; other policies never repeat a draw and
    /// so run out of taken identifiers to skip.
    async fn next_free_id(&mut self) -> Result<T::Id, FrameworkError> {
        let bounded = self.generator.is_bounded();
        let mut previous = None;
        let mut attempts = 0;
        loop {
            if bounded && attempts == MAX_ID_ATTEMPTS {
                return Err(FrameworkError::IdExhausted(attempts));
            }
            attempts += 1;

            let raw = match self.generator.draw() {
                Some(raw) => raw,
                None => self.store.allocate_id().await?,
            };
            // A saturated counter or a misbehaving store repeats itself.
            if !bounded && previous == Some(raw) {
                return Err(FrameworkError::IdExhausted(attempts));
            }
            previous = Some(raw);

            let id = T::Id::from_generated(raw);
            let taken = if self.generator.has_passed(raw) {
                // The counter now covers this id; the explicit entry is redundant.
                self.issued.remove(&id)
            } else {
                self.issued.contains(&id)
            };
            if !taken && !self.store.contains(&id).await? {
                return Ok(id);
            }
        }
    }
}

/// Runs `work` unless the caller's deadline passes, its token fires, or it
/// stops waiting for the answer. Losing branches drop `work`, which aborts any
/// store call it was awaiting.
async fn guarded<R, F>(
    options: &RequestOptions,
    respond_to: &mut Response<R>,
    work: F,
) -> Result<R, FrameworkError>
where
    F: Future<Output = Result<R, FrameworkError>>,
{
    if respond_to.is_closed() {
        return Err(FrameworkError::Canceled);
    }
    tokio::select! {
        biased;
        _ = options.cancelled() => Err(FrameworkError::Canceled),
        _ = options.expired() => Err(FrameworkError::Timeout),
        _ = respond_to.closed() => Err(FrameworkError::Canceled),
        result = work => result,
    }
}

//! # Record Stores
//!
//! A [`RecordStore`] is the narrow interface a `ResourceActor` persists through.
//! The actor holds no copy of the records itself: with [`MemoryStore`] the
//! process owns the authoritative data, and with an external database the
//! collection is only a view over it.
//!
//! Stores are driven by exactly one actor, so methods take `&mut self` for
//! writes and need no internal locking.

use crate::framework::entity::Entity;
use crate::framework::error::StoreError;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};

/// Persistence backend for one collection.
#[async_trait]
pub trait RecordStore<T: Entity>: Send + Sync + 'static {
    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<T>, StoreError>;

    async fn get(&self, id: &T::Id) -> Result<Option<T>, StoreError>;

    async fn contains(&self, id: &T::Id) -> Result<bool, StoreError> {
        Ok(self.get(id).await?.is_some())
    }

    /// Inserts a new record. Fails with `DuplicateKey` if `id` is present.
    async fn insert(&mut self, id: T::Id, record: T) -> Result<(), StoreError>;

    /// Overwrites an existing record, keeping its position in the order.
    async fn replace(&mut self, id: &T::Id, record: T) -> Result<(), StoreError>;

    /// Removes and returns a record.
    async fn remove(&mut self, id: &T::Id) -> Result<T, StoreError>;

    /// Native key assignment, used by `IdPolicy::StoreAssigned`.
    async fn allocate_id(&mut self) -> Result<u64, StoreError>;
}

/// In-memory store: a map keyed by identifier plus an insertion-order index.
///
/// Lookups are O(1); deletes are O(log n) and keep the order of the
/// remaining records.
pub struct MemoryStore<T: Entity> {
    records: HashMap<T::Id, (u64, T)>,
    order: BTreeMap<u64, T::Id>,
    next_seq: u64,
    next_key: u64,
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            order: BTreeMap::new(),
            next_seq: 0,
            next_key: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl<T: Entity> RecordStore<T> for MemoryStore<T> {
    async fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(self
            .order
            .values()
            .filter_map(|id| self.records.get(id))
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn get(&self, id: &T::Id) -> Result<Option<T>, StoreError> {
        Ok(self.records.get(id).map(|(_, record)| record.clone()))
    }

    async fn contains(&self, id: &T::Id) -> Result<bool, StoreError> {
        Ok(self.records.contains_key(id))
    }

    async fn insert(&mut self, id: T::Id, record: T) -> Result<(), StoreError> {
        if self.records.contains_key(&id) {
            return Err(StoreError::DuplicateKey(id.to_string()));
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, id.clone());
        self.records.insert(id, (seq, record));
        Ok(())
    }

    async fn replace(&mut self, id: &T::Id, record: T) -> Result<(), StoreError> {
        match self.records.get_mut(id) {
            Some((_, stored)) => {
                *stored = record;
                Ok(())
            }
            None => Err(StoreError::MissingKey(id.to_string())),
        }
    }

    async fn remove(&mut self, id: &T::Id) -> Result<T, StoreError> {
        let (seq, record) = self
            .records
            .remove(id)
            .ok_or_else(|| StoreError::MissingKey(id.to_string()))?;
        self.order.remove(&seq);
        Ok(record)
    }

    async fn allocate_id(&mut self) -> Result<u64, StoreError> {
        let key = self.next_key;
        self.next_key += 1;
        Ok(key)
    }
}

//! In-memory implementation of the entity store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::entity::{StoredEntity, format_key};
use crate::error::StoreError;

/// An in-memory entity store keyed by business key.
///
/// All mutation happens under one internal mutex, so concurrent writers are
/// serialized at the compare-and-increment step: the writer holding a stale
/// version observes `StoreError::ConcurrencyConflict` instead of silently
/// overwriting.
#[derive(Debug)]
pub struct InMemoryStore<E> {
    entries: Mutex<HashMap<(i32, Option<i32>), E>>,
}

impl<E> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<E: StoredEntity> InMemoryStore<E> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<(i32, Option<i32>), E>> {
        // A poisoned mutex means a writer panicked mid-mutation; the map
        // itself is still structurally valid, so continue with its state.
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Persists a new entity, assigning its storage identity and initial
    /// version 1.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateKey` if an entity with the same
    /// business key already exists.
    pub fn create(&self, mut entity: E) -> Result<E, StoreError> {
        let key = entity.business_key();
        let mut entries = self.entries();
        if entries.contains_key(&key) {
            return Err(StoreError::DuplicateKey {
                key: format_key(key),
            });
        }
        entity.assign_id(Uuid::new_v4());
        entity.set_version(1);
        entries.insert(key, entity.clone());
        Ok(entity)
    }

    /// Updates an existing entity under the optimistic version check.
    ///
    /// The caller's version must equal the stored version; on success the
    /// stored version increments by exactly 1.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the business key does not exist and
    /// `StoreError::ConcurrencyConflict` if the caller's version is stale.
    pub fn update(&self, mut entity: E) -> Result<E, StoreError> {
        let key = entity.business_key();
        let mut entries = self.entries();
        let current = entries.get(&key).ok_or_else(|| StoreError::NotFound {
            key: format_key(key),
        })?;
        if current.version() != entity.version() {
            return Err(StoreError::ConcurrencyConflict {
                key: format_key(key),
                expected: entity.version(),
                actual: current.version(),
            });
        }
        entity.assign_id(current.id().unwrap_or_else(Uuid::new_v4));
        entity.set_version(entity.version() + 1);
        entries.insert(key, entity.clone());
        Ok(entity)
    }

    /// Returns all entities matching the product business key, ordered by
    /// entity id for deterministic results.
    #[must_use]
    pub fn find_by_product_id(&self, product_id: i32) -> Vec<E> {
        let entries = self.entries();
        let mut found: Vec<E> = entries
            .values()
            .filter(|entity| entity.product_id() == product_id)
            .cloned()
            .collect();
        found.sort_by_key(StoredEntity::entity_id);
        found
    }

    /// Deletes all entities matching the product business key and returns
    /// how many were removed. Deleting nothing is success.
    pub fn delete_by_product_id(&self, product_id: i32) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|(key_product_id, _), _| *key_product_id != product_id);
        before - entries.len()
    }

    /// Returns the number of entities in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns `true` if the store holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

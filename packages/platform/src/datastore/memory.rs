use std::collections::BTreeMap;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use super::entity::Entity;
use super::error::DatastoreError;
use super::key::Key;
use super::query::{Direction, Query};
use super::traits::StructuredStore;

/// Process-local structured store.
///
/// Every write is immediately visible to every subsequent query, so the
/// ancestor consistency contract holds trivially.
pub struct MemoryDatastore {
    entities: RwLock<BTreeMap<Key, Entity>>,
    next_id: AtomicI64,
}

impl MemoryDatastore {
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryDatastore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StructuredStore for MemoryDatastore {
    async fn put(&self, mut entity: Entity) -> Result<Key, DatastoreError> {
        let key = if entity.key().is_complete() {
            entity.key().clone()
        } else {
            entity
                .key()
                .with_id(self.next_id.fetch_add(1, Ordering::Relaxed))
        };
        entity.set_key(key.clone());

        self.entities
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.clone(), entity);
        Ok(key)
    }

    async fn get(&self, key: &Key) -> Result<Option<Entity>, DatastoreError> {
        if !key.is_complete() {
            return Err(DatastoreError::IncompleteKey(key.to_string()));
        }
        Ok(self
            .entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    async fn run(&self, query: Query) -> Result<Vec<Entity>, DatastoreError> {
        let mut matches: Vec<Entity> = {
            let entities = self
                .entities
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            entities
                .values()
                .filter(|entity| entity.key().kind() == query.kind())
                .filter(|entity| {
                    query
                        .ancestor_key()
                        .is_none_or(|ancestor| entity.key().has_ancestor(ancestor))
                })
                .filter(|entity| {
                    query.filters().iter().all(|filter| {
                        entity
                            .get(&filter.property)
                            .is_some_and(|value| filter.matches(value))
                    })
                })
                .cloned()
                .collect()
        };

        if let Some((property, direction)) = query.ordering() {
            // Entities lacking the order property drop out, matching the
            // platform's index semantics.
            matches.retain(|entity| entity.get(property).is_some());
            matches.sort_by(|a, b| {
                let ordering = a
                    .get(property)
                    .and_then(|av| b.get(property).and_then(|bv| av.partial_cmp(bv)))
                    .unwrap_or(std::cmp::Ordering::Equal);
                match direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = query.result_limit() {
            matches.truncate(limit);
        }

        if query.is_keys_only() {
            matches = matches.iter().map(Entity::key_only).collect();
        }

        Ok(matches)
    }
}

use async_trait::async_trait;

use super::entity::Entity;
use super::error::DatastoreError;
use super::key::Key;
use super::query::Query;

/// Key-based structured entity storage.
#[async_trait]
pub trait StructuredStore: Send + Sync {
    /// Persist `entity`, allocating a numeric id when its key is incomplete.
    /// Complete keys upsert. Returns the completed key.
    async fn put(&self, entity: Entity) -> Result<Key, DatastoreError>;

    /// Fetch a single entity by complete key.
    async fn get(&self, key: &Key) -> Result<Option<Entity>, DatastoreError>;

    /// Run a query. Keys-only queries apply filters and ordering on full
    /// entities before stripping them to their keys.
    async fn run(&self, query: Query) -> Result<Vec<Entity>, DatastoreError>;
}

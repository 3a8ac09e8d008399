//! Repository traits for entity storage and search

use crate::core::entity::Entity;
use crate::core::error::SeedworkResult;
use crate::core::query::{SearchParams, SearchResult};
use async_trait::async_trait;
use std::sync::Arc;

/// CRUD contract every storage backend satisfies
///
/// Stored entities are handed out as shared pointers: `find_by_id` and
/// `find_all` return the same `Arc` the repository holds. Mutating methods
/// take `&mut self`; a repository shared between tasks must be wrapped in a
/// lock by its owner.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Append an entity to the collection
    async fn insert(&mut self, entity: E) -> SeedworkResult<()>;

    /// Get the first entity with the given id
    async fn find_by_id(&self, id: &str) -> SeedworkResult<Arc<E>>;

    /// All entities, in insertion order
    async fn find_all(&self) -> SeedworkResult<Vec<Arc<E>>>;

    /// Replace the stored entity that has the same id
    async fn update(&mut self, entity: E) -> SeedworkResult<()>;

    /// Remove the entity with the given id
    async fn delete(&mut self, id: &str) -> SeedworkResult<()>;
}

/// Repository with filter → sort → paginate search
#[async_trait]
pub trait SearchableRepository<E: Entity>: Repository<E> {
    /// Field names `search` may sort by; any other sort field is ignored
    fn sortable_fields(&self) -> Vec<&str>;

    /// Run one search over the whole collection
    async fn search(&self, params: SearchParams) -> SeedworkResult<SearchResult<Arc<E>>>;
}

//! In-memory repositories for testing and development

use crate::core::entity::Entity;
use crate::core::error::{NotFoundError, SeedworkResult};
use crate::core::query::{SearchParams, SearchResult, SearchResultProps};
use crate::core::repository::{Repository, SearchableRepository};
use crate::core::search::{Filterable, SortFields, apply_filter, apply_paginate, apply_sort};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Insertion-ordered in-memory repository
///
/// Ids are not checked for uniqueness on insert. Lookups, updates and
/// deletes act on the first entity carrying the id.
pub struct InMemoryRepository<E> {
    items: Vec<Arc<E>>,
}

impl<E: Entity> InMemoryRepository<E> {
    /// Create an empty repository
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Stored entities, in insertion order
    pub fn items(&self) -> &[Arc<E>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn position(&self, id: &str) -> Result<usize, NotFoundError> {
        self.index_of(id)
            .ok_or_else(|| NotFoundError::new(E::entity_type(), id))
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Clone for InMemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<E: Entity> fmt::Debug for InMemoryRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryRepository")
            .field("entity_type", &E::entity_type())
            .field("len", &self.items.len())
            .finish()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn insert(&mut self, entity: E) -> SeedworkResult<()> {
        tracing::debug!(entity_type = E::entity_type(), id = %entity.id(), "insert");
        self.items.push(Arc::new(entity));
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> SeedworkResult<Arc<E>> {
        let index = self.position(id)?;
        Ok(Arc::clone(&self.items[index]))
    }

    async fn find_all(&self) -> SeedworkResult<Vec<Arc<E>>> {
        Ok(self.items.clone())
    }

    async fn update(&mut self, entity: E) -> SeedworkResult<()> {
        let index = self.position(entity.id().as_str())?;
        tracing::debug!(entity_type = E::entity_type(), id = %entity.id(), "update");
        self.items[index] = Arc::new(entity);
        Ok(())
    }

    async fn delete(&mut self, id: &str) -> SeedworkResult<()> {
        let index = self.position(id)?;
        tracing::debug!(entity_type = E::entity_type(), id, "delete");
        self.items.remove(index);
        Ok(())
    }
}

/// In-memory repository with search
///
/// `filter` decides which items match a filter value, `sort_fields` which
/// fields a search may sort by.
pub struct InMemorySearchableRepository<E, F> {
    repository: InMemoryRepository<E>,
    filter: F,
    sort_fields: SortFields<E>,
}

impl<E, F> InMemorySearchableRepository<E, F>
where
    E: Entity,
    F: Filterable<E>,
{
    pub fn new(filter: F, sort_fields: SortFields<E>) -> Self {
        Self {
            repository: InMemoryRepository::new(),
            filter,
            sort_fields,
        }
    }

    /// The underlying collection
    pub fn repository(&self) -> &InMemoryRepository<E> {
        &self.repository
    }
}

impl<E: Entity, F> fmt::Debug for InMemorySearchableRepository<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemorySearchableRepository")
            .field("repository", &self.repository)
            .field("sort_fields", &self.sort_fields)
            .finish()
    }
}

#[async_trait]
impl<E, F> Repository<E> for InMemorySearchableRepository<E, F>
where
    E: Entity,
    F: Filterable<E>,
{
    async fn insert(&mut self, entity: E) -> SeedworkResult<()> {
        self.repository.insert(entity).await
    }

    async fn find_by_id(&self, id: &str) -> SeedworkResult<Arc<E>> {
        self.repository.find_by_id(id).await
    }

    async fn find_all(&self) -> SeedworkResult<Vec<Arc<E>>> {
        self.repository.find_all().await
    }

    async fn update(&mut self, entity: E) -> SeedworkResult<()> {
        self.repository.update(entity).await
    }

    async fn delete(&mut self, id: &str) -> SeedworkResult<()> {
        self.repository.delete(id).await
    }
}

#[async_trait]
impl<E, F> SearchableRepository<E> for InMemorySearchableRepository<E, F>
where
    E: Entity,
    F: Filterable<E>,
{
    fn sortable_fields(&self) -> Vec<&str> {
        self.sort_fields.names()
    }

    async fn search(&self, params: SearchParams) -> SeedworkResult<SearchResult<Arc<E>>> {
        let filtered = apply_filter(self.repository.items.clone(), params.filter(), &self.filter);
        let sorted = apply_sort(filtered, params.sort(), params.sort_dir(), &self.sort_fields);
        let items = apply_paginate(&sorted, params.page(), params.per_page());

        tracing::debug!(
            entity_type = E::entity_type(),
            total = sorted.len(),
            page = params.page(),
            per_page = params.per_page(),
            returned = items.len(),
            "search"
        );

        Ok(SearchResult::new(SearchResultProps {
            items,
            total: sorted.len() as u64,
            current_page: params.page(),
            per_page: params.per_page(),
            sort: params.sort().map(str::to_string),
            sort_dir: params.sort_dir(),
            filter: params.filter().map(str::to_string),
        }))
    }
}

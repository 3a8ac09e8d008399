//! User repository contract and its in-memory implementation

use crate::core::error::{ConfigError, ConflictError, NotFoundError, SeedworkResult};
use crate::core::field::FieldValue;
use crate::core::query::{SearchParams, SearchResult};
use crate::core::repository::{Repository, SearchableRepository};
use crate::core::search::{Filterable, SortFields, contains_ignore_case};
use crate::storage::InMemorySearchableRepository;
use crate::users::entity::UserEntity;
use async_trait::async_trait;
use std::sync::Arc;

/// Fields user searches may sort by, named as in the plain object
pub const USER_SORTABLE_FIELDS: &[&str] = &["name", "createdAt"];

/// Searchable user storage with email lookups
#[async_trait]
pub trait UserRepository: SearchableRepository<UserEntity> {
    /// Get the user registered with `email`
    async fn find_by_email(&self, email: &str) -> SeedworkResult<Arc<UserEntity>>;

    /// Fail with a conflict when `email` is already registered
    async fn email_exists(&self, email: &str) -> SeedworkResult<()>;
}

/// Case-insensitive match on the user name
#[derive(Debug, Clone, Copy, Default)]
pub struct UserNameFilter;

impl Filterable<UserEntity> for UserNameFilter {
    fn matches(&self, item: &UserEntity, filter: &str) -> bool {
        contains_ignore_case(item.name(), filter)
    }
}

fn read_name(user: &UserEntity) -> FieldValue {
    user.name().into()
}

fn read_created_at(user: &UserEntity) -> FieldValue {
    user.created_at().into()
}

/// Accessor of a user field listed in [`USER_SORTABLE_FIELDS`]
fn user_field(field: &str) -> Option<fn(&UserEntity) -> FieldValue> {
    match field {
        "name" => Some(read_name),
        "createdAt" => Some(read_created_at),
        _ => None,
    }
}

/// Sort registry for the given user fields
///
/// Fails with [`ConfigError::MissingAccessor`] for a field users cannot be
/// sorted by.
pub fn user_sort_fields<I, S>(fields: I) -> Result<SortFields<UserEntity>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let declared: Vec<String> = fields.into_iter().map(Into::into).collect();
    let mut builder = SortFields::declare(declared.iter().cloned());

    for field in &declared {
        if let Some(read) = user_field(field) {
            builder = builder.accessor(field.clone(), read);
        }
    }

    builder.build()
}

/// In-memory [`UserRepository`]
///
/// Searches filter on the name and sort by `name` or `createdAt`. Without
/// an explicit sort field the insertion order is kept.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    inner: InMemorySearchableRepository<UserEntity, UserNameFilter>,
}

impl InMemoryUserRepository {
    /// Repository sortable by every field in [`USER_SORTABLE_FIELDS`]
    pub fn new() -> Self {
        let sort_fields = USER_SORTABLE_FIELDS
            .iter()
            .filter_map(|&field| user_field(field).map(|read| (field, read)))
            .fold(SortFields::none(), |fields, (field, read)| {
                fields.with_field(field, read)
            });

        Self {
            inner: InMemorySearchableRepository::new(UserNameFilter, sort_fields),
        }
    }

    /// Repository sortable only by the given fields
    pub fn with_sortable_fields<I, S>(fields: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            inner: InMemorySearchableRepository::new(UserNameFilter, user_sort_fields(fields)?),
        })
    }

    /// Stored users, in insertion order
    pub fn items(&self) -> &[Arc<UserEntity>] {
        self.inner.repository().items()
    }

    fn by_email(&self, email: &str) -> Option<&Arc<UserEntity>> {
        self.items().iter().find(|user| user.email() == email)
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<UserEntity> for InMemoryUserRepository {
    async fn insert(&mut self, entity: UserEntity) -> SeedworkResult<()> {
        self.inner.insert(entity).await
    }

    async fn find_by_id(&self, id: &str) -> SeedworkResult<Arc<UserEntity>> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> SeedworkResult<Vec<Arc<UserEntity>>> {
        self.inner.find_all().await
    }

    async fn update(&mut self, entity: UserEntity) -> SeedworkResult<()> {
        self.inner.update(entity).await
    }

    async fn delete(&mut self, id: &str) -> SeedworkResult<()> {
        self.inner.delete(id).await
    }
}

#[async_trait]
impl SearchableRepository<UserEntity> for InMemoryUserRepository {
    fn sortable_fields(&self) -> Vec<&str> {
        self.inner.sortable_fields()
    }

    async fn search(&self, params: SearchParams) -> SeedworkResult<SearchResult<Arc<UserEntity>>> {
        self.inner.search(params).await
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> SeedworkResult<Arc<UserEntity>> {
        self.by_email(email)
            .cloned()
            .ok_or_else(|| NotFoundError::by_field("user", "email", email).into())
    }

    async fn email_exists(&self, email: &str) -> SeedworkResult<()> {
        if self.by_email(email).is_some() {
            return Err(ConflictError::new("Email address already used").into());
        }
        Ok(())
    }
}

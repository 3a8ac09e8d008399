//! # Seedwork
//!
//! A generic data-access kernel: typed, validated entities stored in
//! in-memory repositories with a shared filter → sort → paginate search.
//!
//! ## Features
//!
//! - **Typed Entities**: `impl_entity!` declares an entity kind over a props struct
//! - **Collect-All Validation**: per-field rule lists report every violation at once
//! - **CRUD Repositories**: one async contract for every entity kind
//! - **Search Engine**: forgiving parameter normalization, stable sorting, page metadata
//! - **Configuration-Based**: search defaults and sortable fields via YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use seedwork::prelude::*;
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! pub struct CategoryProps {
//!     pub name: String,
//! }
//!
//! impl EntityProps for CategoryProps {
//!     fn validator() -> FieldValidator {
//!         FieldValidator::new().rule("name", validators::not_empty())
//!     }
//! }
//!
//! impl_entity!(Category, "category", CategoryProps);
//!
//! let sort_fields = SortFields::none()
//!     .with_field("name", |c: &Category| c.props().name.clone().into());
//! let by_name = |c: &Category, filter: &str| contains_ignore_case(&c.props().name, filter);
//!
//! let mut repository = InMemorySearchableRepository::new(by_name, sort_fields);
//! repository.insert(Category::new(CategoryProps { name: "Movie".into() }, None)?).await?;
//!
//! let page = repository
//!     .search(SearchParams::from_json(json!({"filter": "mov", "sort": "name"})))
//!     .await?;
//! assert_eq!(page.total(), 1);
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod storage;
pub mod users;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::{Entity, EntityId, EntityProps},
        field::FieldValue,
        repository::{Repository, SearchableRepository},
        search::{Filterable, SortFields, contains_ignore_case},
    };

    // === Search ===
    pub use crate::core::query::{
        SearchParams, SearchProps, SearchResult, SearchResultProps, SortDirection,
    };

    // === Validation ===
    pub use crate::core::validation::{FieldValidator, validators};

    // === Errors ===
    pub use crate::core::error::{
        ConfigError, ConflictError, NotFoundError, SeedworkError, SeedworkResult,
        ValidationError,
    };

    // === Macros ===
    pub use crate::impl_entity;

    // === Storage ===
    pub use crate::storage::{InMemoryRepository, InMemorySearchableRepository};

    // === Users ===
    pub use crate::users::{InMemoryUserRepository, UserEntity, UserProps, UserRepository};

    // === Config ===
    pub use crate::config::{SearchConfig, SeedworkConfig, init_tracing};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::json;
}

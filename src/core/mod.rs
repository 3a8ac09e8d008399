//! Core module containing fundamental traits and types for the kernel

pub mod entity;
pub mod error;
pub mod field;
pub mod query;
pub mod repository;
pub mod search;
pub mod validation;

pub use entity::{Entity, EntityId, EntityProps};
pub use error::{
    ConfigError, ConflictError, FieldErrors, NotFoundError, SeedworkError, SeedworkResult,
    ValidationError,
};
pub use field::FieldValue;
pub use query::{
    DEFAULT_PER_PAGE, SearchParams, SearchProps, SearchResult, SearchResultProps, SortDirection,
};
pub use repository::{Repository, SearchableRepository};
pub use search::{Filterable, SortFields, contains_ignore_case};
pub use validation::FieldValidator;

//! User accounts: entity, validation rules and repository

pub mod entity;
pub mod repository;

pub use entity::{UserEntity, UserProps};
pub use repository::{
    InMemoryUserRepository, USER_SORTABLE_FIELDS, UserNameFilter, UserRepository,
    user_sort_fields,
};

//! Storage implementations of the repository traits

pub mod in_memory;

pub use in_memory::{InMemoryRepository, InMemorySearchableRepository};

//! Entity declaration helpers

#[macro_use]
pub mod macros;

//! Typed error handling for the seedwork kernel
//!
//! Callers get concrete error types they can match on instead of a generic
//! `anyhow::Error`.
//!
//! # Error Categories
//!
//! - [`NotFoundError`]: repository lookups that found nothing
//! - [`ValidationError`]: entity construction or mutation rejected by its rules
//! - [`ConflictError`]: uniqueness checks performed by domain repositories
//! - [`ConfigError`]: configuration parsing and sortable-field registration
//!
//! # Example
//!
//! ```rust,ignore
//! use seedwork::prelude::*;
//!
//! match repository.find_by_id(&id).await {
//!     Ok(user) => println!("Found: {:?}", user),
//!     Err(SeedworkError::NotFound(e)) => println!("{} is gone", e.value),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Field name → violation messages, in rule declaration order
pub type FieldErrors = IndexMap<String, Vec<String>>;

/// The main error type of the kernel
#[derive(Debug, Error)]
pub enum SeedworkError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An entity could not be turned into its plain-object form
    #[error("Failed to serialize {entity_type}: {message}")]
    Serialization {
        entity_type: String,
        message: String,
    },
}

impl SeedworkError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SeedworkError::NotFound(_) => "ENTITY_NOT_FOUND",
            SeedworkError::Validation(_) => "VALIDATION_ERROR",
            SeedworkError::Conflict(_) => "CONFLICT",
            SeedworkError::Config(_) => "CONFIG_ERROR",
            SeedworkError::Serialization { .. } => "SERIALIZATION_ERROR",
        }
    }

    /// Whether this is a repository miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, SeedworkError::NotFound(_))
    }
}

/// A specialized Result type for seedwork operations
pub type SeedworkResult<T> = Result<T, SeedworkError>;

// =============================================================================
// Not found
// =============================================================================

/// No entity matched a repository lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity_type} with {field} '{value}' not found")]
pub struct NotFoundError {
    pub entity_type: String,
    /// Field the lookup was keyed on, `id` for plain lookups
    pub field: String,
    pub value: String,
}

impl NotFoundError {
    /// Lookup by id missed
    pub fn new(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::by_field(entity_type, "id", id)
    }

    /// Lookup by some other unique field missed
    pub fn by_field(
        entity_type: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            field: field.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Supplied properties violate one or more field rules
///
/// Messages are aggregated across every rule of every field so a caller can
/// report everything wrong at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub struct ValidationError {
    errors: FieldErrors,
}

impl ValidationError {
    pub fn new(errors: FieldErrors) -> Self {
        Self { errors }
    }

    /// Single message on a single field
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), vec![message.into()]);
        Self { errors }
    }

    /// All violations, keyed by field name
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Violations for one field, empty when the field passed
    pub fn messages_for(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }

    /// Append the violations of `other`, keeping field order
    pub fn merge(mut self, other: ValidationError) -> Self {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .errors
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join("; ")))
            .collect();
        write!(f, "Validation errors: {}", msgs.join(", "))
    }
}

// =============================================================================
// Conflict
// =============================================================================

/// A uniqueness rule enforced by a domain repository was violated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConflictError {
    pub message: String,
}

impl ConflictError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// =============================================================================
// Config
// =============================================================================

/// Errors related to configuration and repository registration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    /// A field is declared sortable but has no accessor
    #[error("Sortable field '{field}' has no accessor registered")]
    MissingAccessor { field: String },

    /// An accessor was registered for a field that is not declared sortable
    #[error("Accessor registered for undeclared sortable field '{field}'")]
    UndeclaredField { field: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for SeedworkError {
    fn from(err: serde_yaml::Error) -> Self {
        SeedworkError::Config(err.into())
    }
}

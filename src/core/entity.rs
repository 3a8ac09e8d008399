//! Entity traits defining the core abstraction for all domain objects

use crate::core::error::{SeedworkError, SeedworkResult, ValidationError};
use crate::core::validation::FieldValidator;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Opaque entity identifier in the hyphenated UUID text form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generate a fresh random (v4) identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accept an existing identifier if it is a hyphenated UUID
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        if id.len() == 36 && Uuid::try_parse(id).is_ok() {
            Ok(Self(id.to_string()))
        } else {
            Err(ValidationError::field("id", "id must be a UUID"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EntityId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The typed property bag of an entity kind
///
/// Rules returned by [`EntityProps::validator`] run against the JSON form of
/// the props on construction and after every mutation.
pub trait EntityProps:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Field rules for this entity kind (none by default)
    fn validator() -> FieldValidator {
        FieldValidator::new()
    }
}

/// Base trait for all entities in the system.
///
/// All entities have:
/// - id: Unique identifier, fixed at construction
/// - props: The kind-specific fields
///
/// Entity kinds are normally declared with [`impl_entity!`](crate::impl_entity),
/// which also generates the validating constructors and `update_props`.
pub trait Entity: Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    type Props: EntityProps;

    /// The entity kind name (e.g., "user")
    fn entity_type() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> &EntityId;

    /// Get the kind-specific fields
    fn props(&self) -> &Self::Props;

    /// `id` merged with every prop field
    fn to_plain_object(&self) -> SeedworkResult<Map<String, Value>> {
        let serialization_error = |message: String| SeedworkError::Serialization {
            entity_type: Self::entity_type().to_string(),
            message,
        };

        match serde_json::to_value(self).map_err(|e| serialization_error(e.to_string()))? {
            Value::Object(map) => Ok(map),
            other => Err(serialization_error(format!(
                "expected an object, got {}",
                other
            ))),
        }
    }
}

/// Run the rules of `P` against `props`
pub fn validate_props<P: EntityProps>(props: &P) -> Result<(), ValidationError> {
    let value =
        serde_json::to_value(props).map_err(|e| ValidationError::field("props", e.to_string()))?;
    P::validator().validate(&value)
}

/// Validate props and resolve the id of a new entity
///
/// Id and prop violations are reported together.
pub fn prepare<P: EntityProps>(props: &P, id: Option<&str>) -> Result<EntityId, ValidationError> {
    let id = id.map(EntityId::parse).transpose();
    let checked = validate_props(props);

    match (id, checked) {
        (Ok(id), Ok(())) => Ok(id.unwrap_or_else(EntityId::generate)),
        (Err(id_err), Ok(())) => Err(id_err),
        (Ok(_), Err(props_err)) => Err(props_err),
        (Err(id_err), Err(props_err)) => Err(id_err.merge(props_err)),
    }
}

/// Decode props from raw input after checking it against the rules of `P`
///
/// Checking the raw value first reports type mismatches (e.g. a number where
/// a string is expected) as rule violations rather than decoding errors.
pub fn props_from_value<P: EntityProps>(raw: Value) -> Result<P, ValidationError> {
    P::validator().validate(&raw)?;
    serde_json::from_value(raw).map_err(|e| ValidationError::field("props", e.to_string()))
}

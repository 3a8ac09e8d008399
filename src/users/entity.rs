//! The user entity

use crate::core::entity::{Entity, EntityProps};
use crate::core::error::ValidationError;
use crate::core::validation::FieldValidator;
use crate::core::validation::validators::{is_date, is_email, is_string, max_length, not_empty};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fields of a user account
///
/// Serialized in camelCase, so the creation date is `createdAt` in plain
/// objects, validation messages and sort requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProps {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl UserProps {
    /// Props for a user created now
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            created_at: Utc::now(),
        }
    }
}

impl EntityProps for UserProps {
    fn validator() -> FieldValidator {
        FieldValidator::new()
            .rule("name", not_empty())
            .rule("name", is_string())
            .rule("name", max_length(255))
            .rule("email", is_email())
            .rule("email", not_empty())
            .rule("email", is_string())
            .rule("email", max_length(255))
            .rule("password", not_empty())
            .rule("password", is_string())
            .rule("password", max_length(100))
            .optional("createdAt")
            .rule("createdAt", is_date())
    }
}

crate::impl_entity!(UserEntity, "user", UserProps);

impl UserEntity {
    pub fn name(&self) -> &str {
        &self.props().name
    }

    pub fn email(&self) -> &str {
        &self.props().email
    }

    pub fn password(&self) -> &str {
        &self.props().password
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.props().created_at
    }

    /// Rename the user
    pub fn update(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        self.update_props(|props| props.name = name)
    }

    /// Replace the stored password
    pub fn update_password(&mut self, password: impl Into<String>) -> Result<(), ValidationError> {
        let password = password.into();
        self.update_props(|props| props.password = password)
    }
}

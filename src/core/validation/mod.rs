//! Field validation
//!
//! Every entity kind declares an ordered list of rules per field. Validation
//! runs all of them and reports every violation at once, grouped by field.

pub mod validators;

use crate::core::error::{FieldErrors, ValidationError};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A single field rule: `(field name, raw value) -> violation message`
pub type Rule = Arc<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

#[derive(Clone, Default)]
struct FieldRules {
    optional: bool,
    rules: Vec<Rule>,
}

/// Ordered per-field rule lists with collect-all-errors semantics
///
/// # Example
/// ```rust,ignore
/// let validator = FieldValidator::new()
///     .rule("name", validators::not_empty())
///     .rule("name", validators::max_length(255))
///     .optional("created_at")
///     .rule("created_at", validators::is_date());
///
/// validator.validate(&json!({"name": ""}))?;
/// ```
#[derive(Clone, Default)]
pub struct FieldValidator {
    fields: IndexMap<&'static str, FieldRules>,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule to a field; rules of a field run in the order added
    pub fn rule<R>(mut self, field: &'static str, rule: R) -> Self
    where
        R: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.fields
            .entry(field)
            .or_default()
            .rules
            .push(Arc::new(rule));
        self
    }

    /// Skip every rule of `field` when it is missing or null
    pub fn optional(mut self, field: &'static str) -> Self {
        self.fields.entry(field).or_default().optional = true;
        self
    }

    /// Names of the fields that carry rules, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    /// Check `data` against every rule
    ///
    /// A non-object input reads every field as `null`.
    pub fn validate(&self, data: &Value) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        let null = Value::Null;

        for (&field, field_rules) in &self.fields {
            let value = data.get(field).unwrap_or(&null);
            if field_rules.optional && value.is_null() {
                continue;
            }

            let messages: Vec<String> = field_rules
                .rules
                .iter()
                .filter_map(|rule| rule(field, value).err())
                .collect();

            if !messages.is_empty() {
                errors.insert(field.to_string(), messages);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(errors))
        }
    }
}

impl fmt::Debug for FieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldValidator")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

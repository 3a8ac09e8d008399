//! Reusable field rules
//!
//! Each rule receives the field name and its raw JSON value and returns the
//! violation message on failure. A missing field is passed as `null`.

use regex::Regex;
use serde_json::Value;
use validator::ValidateEmail;

/// Rule: value is neither null nor the empty string
pub fn not_empty() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null => Err(format!("{} should not be empty", field)),
        Value::String(s) if s.is_empty() => Err(format!("{} should not be empty", field)),
        _ => Ok(()),
    }
}

/// Rule: value is a string
pub fn is_string() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if value.is_string() {
            Ok(())
        } else {
            Err(format!("{} must be a string", field))
        }
    }
}

/// Rule: value is a string of at most `max` characters
///
/// Non-string values fail as well.
pub fn max_length(max: usize) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| match value.as_str() {
        Some(s) if s.chars().count() <= max => Ok(()),
        _ => Err(format!(
            "{} must be shorter than or equal to {} characters",
            field, max
        )),
    }
}

/// Rule: value is a string holding an email address
pub fn is_email() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_str() {
        Some(s) if s.validate_email() => Ok(()),
        _ => Err(format!("{} must be an email", field)),
    }
}

/// Rule: value is a finite number
pub fn is_number() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_f64() {
        Some(n) if n.is_finite() => Ok(()),
        _ => Err(format!(
            "{} must be a number conforming to the specified constraints",
            field
        )),
    }
}

/// Rule: number must be strictly positive
///
/// Non-numbers pass through; combine with [`is_number`] to reject them.
pub fn positive() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_f64() {
        Some(n) if n <= 0.0 => Err(format!("{} must be a positive number", field)),
        _ => Ok(()),
    }
}

/// Rule: value is an RFC 3339 timestamp
pub fn is_date() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_str() {
        Some(s) if chrono::DateTime::parse_from_rfc3339(s).is_ok() => Ok(()),
        _ => Err(format!("{} must be a Date instance", field)),
    }
}

/// Rule: value is a string matching `regex`
pub fn matches(regex: Regex) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| match value.as_str() {
        Some(s) if regex.is_match(s) => Ok(()),
        _ => Err(format!(
            "{} must match {} regular expression",
            field,
            regex.as_str()
        )),
    }
}

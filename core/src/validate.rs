//! Option declaration validation.
//!
//! Catches structural mistakes in an [`ObjectSchema`] such as empty or
//! duplicate keys, malformed aliases and broken regex patterns. These are
//! author errors, not user input errors, and are reported separately from
//! value validation.
//!
//! # Examples
//!
//! ```
//! use command_args_core::*;
//!
//! let schema = ObjectSchema::new().field(FieldSchema::string("name").alias("n"));
//! assert!(validate_schema(&schema).is_empty());
//!
//! // Invalid: alias written with its dash
//! let bad = ObjectSchema::new().field(FieldSchema::string("name").alias("-n"));
//! assert!(!validate_schema(&bad).is_empty());
//! ```

use std::collections::HashSet;

use regex::Regex;
use thiserror::Error;

use crate::ObjectSchema;

/// Option declaration errors.
///
/// Each variant describes a specific structural problem found during
/// validation. The `Display` impl provides a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// Field key is empty or whitespace-only.
    #[error("field key cannot be empty")]
    EmptyFieldKey,
    /// Two fields share a key.
    #[error("duplicate field key: {0}")]
    DuplicateField(String),
    /// Field key contains whitespace or starts with a dash.
    #[error("invalid field key: {0}")]
    InvalidFieldKey(String),
    /// Alias is empty, contains whitespace or is written with its dashes.
    #[error("invalid alias '{alias}' on field {key}")]
    InvalidAlias { key: String, alias: String },
    /// Regex pattern does not compile.
    #[error("invalid pattern on field {key}: {reason}")]
    InvalidPattern { key: String, reason: String },
    /// Lower bound is greater than the upper bound.
    #[error("min exceeds max on field {0}")]
    InvertedBounds(String),
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('-') && !name.chars().any(char::is_whitespace)
}

/// Validates option declarations.
///
/// Returns every problem found, in declaration order.
///
/// # Examples
///
/// ```
/// use command_args_core::*;
///
/// let schema = ObjectSchema::new()
///     .field(FieldSchema::string("name"))
///     .field(FieldSchema::number("name"));
///
/// assert_eq!(
///     validate_schema(&schema),
///     vec![DefinitionError::DuplicateField("name".into())]
/// );
/// ```
pub fn validate_schema(schema: &ObjectSchema) -> Vec<DefinitionError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for field in &schema.fields {
        let key = field.key.as_str();
        if key.trim().is_empty() {
            errors.push(DefinitionError::EmptyFieldKey);
            continue;
        }
        if !is_valid_name(key) {
            errors.push(DefinitionError::InvalidFieldKey(key.to_string()));
        }
        if !seen.insert(key) {
            errors.push(DefinitionError::DuplicateField(key.to_string()));
        }

        for alias in &field.aliases {
            if !is_valid_name(alias) {
                errors.push(DefinitionError::InvalidAlias {
                    key: key.to_string(),
                    alias: alias.clone(),
                });
            }
        }

        if let Some(pattern) = &field.pattern {
            if let Err(err) = Regex::new(pattern) {
                errors.push(DefinitionError::InvalidPattern {
                    key: key.to_string(),
                    reason: err.to_string(),
                });
            }
        }

        if let (Some(min), Some(max)) = (field.min, field.max) {
            if min > max {
                errors.push(DefinitionError::InvertedBounds(key.to_string()));
            }
        }
    }

    errors
}

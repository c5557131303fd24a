//! Read-only view of option declarations.
//!
//! The resolver and the help renderer only need four facts about an option:
//! its kind, whether it is optional, its aliases and its description.
//! [`FieldDescriptor`] exposes exactly those over a borrowed
//! [`FieldSchema`]; [`unwrap_shape`] peels refinement wrappers off a schema
//! to reach the declarations.

use command_args_core::{FieldSchema, FieldType, ObjectSchema, Schema, SchemaNode};

use crate::error::{ConfigError, Result};

/// How the resolver treats an option's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Array,
}

/// Per-option metadata derived from a [`FieldSchema`].
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor<'a> {
    field: &'a FieldSchema,
}

impl<'a> FieldDescriptor<'a> {
    pub fn new(field: &'a FieldSchema) -> Self {
        Self { field }
    }

    pub fn key(&self) -> &'a str {
        &self.field.key
    }

    pub fn kind(&self) -> FieldKind {
        match self.field.field_type {
            FieldType::String => FieldKind::String,
            FieldType::Number => FieldKind::Number,
            FieldType::Boolean => FieldKind::Boolean,
            FieldType::Array(_) => FieldKind::Array,
        }
    }

    pub fn is_optional(&self) -> bool {
        self.field.optional
    }

    pub fn aliases(&self) -> &'a [String] {
        &self.field.aliases
    }

    pub fn description(&self) -> Option<&'a str> {
        self.field.description.as_deref()
    }
}

/// Descriptors for every option, in declaration order.
pub fn descriptors(shape: &ObjectSchema) -> Vec<FieldDescriptor<'_>> {
    shape.fields.iter().map(FieldDescriptor::new).collect()
}

/// Unwraps any number of wrapper layers down to the field shape.
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedSchema`] when a layer cannot be
/// introspected. This is an authoring error and is not recoverable.
pub fn unwrap_shape<'a>(command: &str, schema: &'a dyn Schema) -> Result<&'a ObjectSchema> {
    let mut current = schema;
    loop {
        match current.node() {
            SchemaNode::Object(shape) => return Ok(shape),
            SchemaNode::Wrapped(inner) => current = inner,
            SchemaNode::Unsupported(kind) => {
                return Err(ConfigError::UnsupportedSchema {
                    command: command.to_string(),
                    kind: kind.to_string(),
                });
            }
        }
    }
}

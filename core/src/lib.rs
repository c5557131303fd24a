//! Option schemas and validation for command-line commands.
//!
//! This crate defines the schema side of `command-args`:
//!
//! - [`FieldSchema`]: one option with its value type, optionality, aliases,
//!   description, default and constraints.
//! - [`ObjectSchema`]: the ordered option set of a command.
//! - [`Refined`]: a wrapper adding a cross-field check on top of another
//!   schema.
//! - [`Schema`]: the capability trait the argument engine consumes for node
//!   introspection, description lookup and safe validation.
//!
//! Declaration checks ([`validate_schema`]) catch author mistakes such as
//! duplicate keys or malformed aliases.
//!
//! # Example
//!
//! ```
//! use command_args_core::*;
//! use serde_json::json;
//!
//! let schema = ObjectSchema::new()
//!     .describe("Add a user")
//!     .field(FieldSchema::string("name").alias("n").describe("The user's name"))
//!     .field(FieldSchema::number("age").optional());
//!
//! assert!(validate_schema(&schema).is_empty());
//!
//! let input = json!({ "name": "Alice", "age": 30 });
//! let record = schema.safe_validate(input.as_object().unwrap()).unwrap();
//! assert_eq!(record.get("name"), Some(&json!("Alice")));
//! ```

mod refine;
mod schema;
mod types;
mod validate;
mod values;

pub use refine::{Refined, SchemaExt};
pub use schema::{Issue, PathSegment, Record, Schema, SchemaNode};
pub use types::*;
pub use validate::{DefinitionError, validate_schema};

//! Schema-driven command dispatch and option parsing.
//!
//! Commands are declared as a name, an option schema from
//! [`command_args_core`], a handler and aliases. [`Dispatcher::parse`] then
//! takes the raw argument tokens and:
//!
//! 1. picks the command (or shows global help);
//! 2. resolves option tokens against the command's schema
//!    ([`ArgumentResolver`]);
//! 3. validates the assembled record with the full schema, refinements
//!    included ([`validate_record`]);
//! 4. runs the handler with the [`ParsedArgs`], reporting any error it
//!    returns.
//!
//! Failures are written to the error channel of an [`Output`] and followed
//! by help text.
//!
//! # Example
//!
//! ```
//! use command_args::{BufferedOutput, Dispatch, Dispatcher};
//! use command_args_core::{ElementType, FieldSchema, ObjectSchema};
//!
//! let mut cli = Dispatcher::new();
//! cli.add_command(
//!     "tag",
//!     ObjectSchema::new()
//!         .describe("Tag an item")
//!         .field(FieldSchema::number("id"))
//!         .field(FieldSchema::array("tags", ElementType::String).alias("t")),
//!     |args| {
//!         assert_eq!(args.get_i64("id"), Some(7));
//!         assert_eq!(args.get_strings("tags"), Some(vec!["x", "y"]));
//!         Ok(())
//!     },
//!     ["t"],
//! );
//!
//! let mut out = BufferedOutput::default();
//! assert_eq!(
//!     cli.parse_with(["tag", "--id=7", "-t", "x", "y"], &mut out).unwrap(),
//!     Dispatch::Executed("tag".into())
//! );
//!
//! cli.parse_with(["tag", "--id", "7", "stray"], &mut out).unwrap();
//! assert_eq!(out.errors, vec!["Unknown argument: stray".to_string()]);
//! ```

mod alias;
mod args;
mod bridge;
mod coerce;
mod config;
mod descriptor;
mod dispatch;
mod error;
mod help;
mod output;
mod registry;
mod resolver;

pub use alias::AliasTable;
pub use args::ParsedArgs;
pub use bridge::validate_record;
pub use coerce::{CoercionPolicy, TypeCoercer};
pub use config::ParserConfig;
pub use descriptor::{FieldDescriptor, FieldKind, descriptors, unwrap_shape};
pub use dispatch::{Dispatch, Dispatcher};
pub use error::{ConfigError, ParseError, Result, ValidationReport};
pub use help::{render_command_help, render_global_help};
pub use output::{BufferedOutput, ConsoleOutput, Output};
pub use registry::{CommandDefinition, CommandRegistry, Handler, HandlerResult};
pub use resolver::{ArgumentResolver, ParseOutcome};

//! Error types for argument parsing and dispatch.
//!
//! [`ParseError`] covers everything a user can get wrong on the command
//! line; its `Display` output is exactly what gets written to the error
//! channel. [`ConfigError`] covers mistakes by the CLI author and failures
//! loading configuration.

use std::fmt;

use command_args_core::Issue;
use thiserror::Error;

/// Every issue reported by a failed schema validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Argument validation failed:")?;
        for issue in &self.issues {
            let path = issue.dotted_path();
            let path = if path.is_empty() { "Input" } else { path.as_str() };
            write!(f, "\n  - {path}: {}", issue.message)?;
        }
        Ok(())
    }
}

/// User-facing parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The first token names no registered command or alias.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    /// An option token is not in the command's alias table.
    #[error("Unknown option: {0}")]
    UnknownOption(String),
    /// A value-taking option has no value after it.
    #[error("Option {0} requires a value")]
    MissingOptionValue(String),
    /// A token was left over that no option consumed.
    #[error("Unknown argument: {0}")]
    UnknownArgument(String),
    /// A value could not be coerced under the strict coercion policy.
    #[error("Invalid value for {option}: expected {expected}, received \"{value}\"")]
    InvalidValue {
        option: String,
        expected: &'static str,
        value: String,
    },
    /// The assembled record was rejected by the command's schema.
    #[error("{0}")]
    Validation(ValidationReport),
    /// The command handler returned an error.
    #[error("An error occurred while executing the command: {0}")]
    HandlerRuntime(String),
}

/// Errors in how the CLI was put together or configured.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A command schema cannot be unwrapped to a field shape.
    #[error("unsupported schema for command {command}: {kind}")]
    UnsupportedSchema { command: String, kind: String },

    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;

//! The schema capability interface.
//!
//! The argument engine never inspects concrete schema types. It asks a
//! [`Schema`] for its [`SchemaNode`] to reach the field shape, for its
//! description, and for a safe validation pass over an assembled record.

use std::fmt;

use serde_json::{Map, Value};

use crate::ObjectSchema;

/// A record of option values keyed by field key.
pub type Record = Map<String, Value>;

/// One step of an [`Issue`] path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object key.
    Key(String),
    /// Array index.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// A single validation problem.
///
/// # Examples
///
/// ```
/// use command_args_core::{Issue, PathSegment};
///
/// let path = vec![PathSegment::from("tags"), PathSegment::from(1)];
/// let issue = Issue::new(path, "Expected number, received string");
/// assert_eq!(issue.dotted_path(), "tags.1");
/// assert_eq!(Issue::new(Vec::new(), "Invalid").dotted_path(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Location of the offending value; empty for record-level issues.
    pub path: Vec<PathSegment>,
    /// Human-readable message.
    pub message: String,
}

impl Issue {
    pub fn new(path: impl IntoIterator<Item = PathSegment>, message: impl Into<String>) -> Self {
        Self {
            path: path.into_iter().collect(),
            message: message.into(),
        }
    }

    /// Path segments joined with `.`.
    pub fn dotted_path(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// What a schema looks like from the outside.
pub enum SchemaNode<'a> {
    /// A plain field shape.
    Object(&'a ObjectSchema),
    /// A wrapper (refinement, transform) around another schema.
    Wrapped(&'a dyn Schema),
    /// A shape the argument engine cannot introspect; carries a type label.
    Unsupported(&'static str),
}

/// Capability interface consumed by the argument engine.
pub trait Schema {
    /// Exposes the node so callers can unwrap down to the field shape.
    fn node(&self) -> SchemaNode<'_>;

    /// Validates an assembled record without panicking.
    ///
    /// On success returns the validated record (defaults applied, array
    /// elements coerced). On failure returns every issue found.
    fn safe_validate(&self, input: &Record) -> Result<Record, Vec<Issue>>;

    /// Schema-level description, looked up through wrappers.
    fn description(&self) -> Option<&str> {
        match self.node() {
            SchemaNode::Object(shape) => shape.description.as_deref(),
            SchemaNode::Wrapped(inner) => inner.description(),
            SchemaNode::Unsupported(_) => None,
        }
    }
}

impl<S: Schema + ?Sized> Schema for Box<S> {
    fn node(&self) -> SchemaNode<'_> {
        (**self).node()
    }

    fn safe_validate(&self, input: &Record) -> Result<Record, Vec<Issue>> {
        (**self).safe_validate(input)
    }

    fn description(&self) -> Option<&str> {
        (**self).description()
    }
}

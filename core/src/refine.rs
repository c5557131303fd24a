//! Cross-field refinements.
//!
//! A [`Refined`] schema wraps another schema and runs a predicate over the
//! record that the inner schema accepted. Wrappers nest: every layer of
//! [`SchemaExt::refine`] adds one more check.
//!
//! # Examples
//!
//! ```
//! use command_args_core::{FieldSchema, ObjectSchema, Schema, SchemaExt};
//! use serde_json::json;
//!
//! let schema = ObjectSchema::new()
//!     .field(FieldSchema::boolean("force").optional())
//!     .field(FieldSchema::boolean("interactive").optional())
//!     .refine(
//!         |r| !(r.get("force") == Some(&json!(true)) && r.get("interactive") == Some(&json!(true))),
//!         "force and interactive are mutually exclusive",
//!     );
//!
//! let both = json!({ "force": true, "interactive": true });
//! let issues = schema.safe_validate(both.as_object().unwrap()).unwrap_err();
//! assert_eq!(issues[0].message, "force and interactive are mutually exclusive");
//! ```

use std::fmt;

use crate::schema::{Issue, PathSegment, Record, Schema, SchemaNode};

type Check = Box<dyn Fn(&Record) -> bool>;

/// A schema with an extra record-level check.
pub struct Refined<S> {
    inner: S,
    check: Check,
    message: String,
    path: Vec<PathSegment>,
}

impl<S: Schema> Refined<S> {
    pub fn new(
        inner: S,
        check: impl Fn(&Record) -> bool + 'static,
        message: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            check: Box::new(check),
            message: message.into(),
            path: Vec::new(),
        }
    }

    /// Reports the refinement issue at `path` instead of the record root.
    pub fn at_path<I, P>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathSegment>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    /// The wrapped schema.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S> fmt::Debug for Refined<S>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refined")
            .field("inner", &self.inner)
            .field("message", &self.message)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl<S: Schema> Schema for Refined<S> {
    fn node(&self) -> SchemaNode<'_> {
        SchemaNode::Wrapped(&self.inner)
    }

    fn safe_validate(&self, input: &Record) -> Result<Record, Vec<Issue>> {
        let data = self.inner.safe_validate(input)?;
        if (self.check)(&data) {
            Ok(data)
        } else {
            Err(vec![Issue::new(self.path.clone(), self.message.clone())])
        }
    }
}

/// Chaining helpers available on every sized schema.
pub trait SchemaExt: Schema + Sized {
    /// Wraps `self` in a [`Refined`] layer.
    fn refine(
        self,
        check: impl Fn(&Record) -> bool + 'static,
        message: impl Into<String>,
    ) -> Refined<Self> {
        Refined::new(self, check, message)
    }
}

impl<S: Schema> SchemaExt for S {}

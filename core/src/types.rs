//! Option schema type definitions.
//!
//! This module defines the declarations a command author writes for each
//! option: its value type, optionality, aliases, description, default and
//! value constraints. The types are designed for serialization with
//! [`serde`] so option sets can also be loaded from JSON or YAML.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value type of an array element.
///
/// Elements always arrive from the command line as strings; `Number` and
/// `Boolean` elements are coerced during validation.
///
/// # Examples
///
/// ```
/// use command_args_core::ElementType;
///
/// assert_eq!(ElementType::default(), ElementType::String);
/// assert_eq!(ElementType::Number.name(), "number");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    /// Plain string elements (the default).
    #[default]
    String,
    /// Numeric elements.
    Number,
    /// `true` / `false` elements.
    Boolean,
}

impl ElementType {
    /// Lower-case name used in validation messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// Value type of an option.
///
/// # Examples
///
/// ```
/// use command_args_core::{ElementType, FieldType};
///
/// let tags = FieldType::Array(ElementType::String);
/// assert!(tags.is_array());
/// assert!(!FieldType::Number.is_array());
/// assert_eq!(tags.name(), "array");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// String value.
    String,
    /// Numeric value.
    Number,
    /// Boolean flag.
    Boolean,
    /// Ordered list of values.
    Array(ElementType),
}

impl FieldType {
    /// Lower-case name used in validation messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array(_) => "array",
        }
    }

    /// Returns `true` for [`FieldType::Array`].
    pub fn is_array(self) -> bool {
        matches!(self, Self::Array(_))
    }
}

/// Declaration of a single command option.
///
/// Use the typed constructors ([`string`](FieldSchema::string),
/// [`number`](FieldSchema::number), [`boolean`](FieldSchema::boolean),
/// [`array`](FieldSchema::array)) and chain builder methods.
///
/// # Examples
///
/// ```
/// use command_args_core::{FieldSchema, FieldType};
///
/// let name = FieldSchema::string("name")
///     .alias("n")
///     .alias("fullname")
///     .describe("The user's name");
/// assert_eq!(name.field_type, FieldType::String);
/// assert!(!name.optional);
/// assert_eq!(name.aliases, vec!["n", "fullname"]);
///
/// let verbose = FieldSchema::boolean("verbose").optional();
/// assert!(verbose.optional);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Record key, also the canonical `--key` option name.
    pub key: String,
    /// Type of value this option accepts.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether the option may be omitted.
    #[serde(default)]
    pub optional: bool,
    /// Additional option names; one character means `-x`, longer means `--name`.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Help text for the option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Value used when the option is omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Lower bound: numeric value, string length or array length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound: numeric value, string length or array length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Regular expression a string value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Closed set of accepted string values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

impl FieldSchema {
    /// Creates a required option of the given type.
    pub fn new(key: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            field_type,
            optional: false,
            aliases: Vec::new(),
            description: None,
            default: None,
            min: None,
            max: None,
            pattern: None,
            choices: Vec::new(),
        }
    }

    /// Creates a required string option.
    pub fn string(key: impl Into<String>) -> Self {
        Self::new(key, FieldType::String)
    }

    /// Creates a required numeric option.
    pub fn number(key: impl Into<String>) -> Self {
        Self::new(key, FieldType::Number)
    }

    /// Creates a required boolean flag.
    ///
    /// Flags are usually combined with [`optional`](FieldSchema::optional) so
    /// that leaving them out is not an error.
    pub fn boolean(key: impl Into<String>) -> Self {
        Self::new(key, FieldType::Boolean)
    }

    /// Creates a required array option.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_args_core::{ElementType, FieldSchema, FieldType};
    ///
    /// let ids = FieldSchema::array("ids", ElementType::Number).min(1.0);
    /// assert_eq!(ids.field_type, FieldType::Array(ElementType::Number));
    /// assert_eq!(ids.min, Some(1.0));
    /// ```
    pub fn array(key: impl Into<String>, element: ElementType) -> Self {
        Self::new(key, FieldType::Array(element))
    }

    /// Marks the option as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Adds an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Adds a description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a default value. An option with a default is optional.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_args_core::FieldSchema;
    ///
    /// let port = FieldSchema::number("port").default_value(8080);
    /// assert!(port.optional);
    /// assert_eq!(port.default, Some(8080.into()));
    /// ```
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self.optional = true;
        self
    }

    /// Sets the lower bound.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the upper bound.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Requires string values to match a regular expression.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Restricts string values to a closed set.
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }
}

/// Ordered set of option declarations for one command.
///
/// Field order is significant: it is the order used for help output.
///
/// # Examples
///
/// ```
/// use command_args_core::{FieldSchema, ObjectSchema};
///
/// let schema = ObjectSchema::new()
///     .describe("Add a user")
///     .field(FieldSchema::string("name"))
///     .field(FieldSchema::number("age").optional());
///
/// assert_eq!(schema.keys(), vec!["name", "age"]);
/// assert!(schema.get("age").unwrap().optional);
/// assert!(schema.get("email").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// Command-level description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Option declarations in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

impl ObjectSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the command-level description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends an option declaration.
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Finds a declaration by key.
    pub fn get(&self, key: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Returns all keys in declaration order.
    pub fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.key.as_str()).collect()
    }
}

//! Parsed, validated option values.

use command_args_core::Record;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Option values keyed by field key, as handed to a command handler.
///
/// Values have passed the command's schema, so defaults are filled in and
/// array elements carry their element type.
///
/// # Examples
///
/// ```
/// use command_args::ParsedArgs;
/// use serde::Deserialize;
/// use serde_json::json;
///
/// let args = ParsedArgs::from_value(json!({ "name": "Alice", "age": 30 })).unwrap();
/// assert_eq!(args.get_str("name"), Some("Alice"));
/// assert_eq!(args.get_f64("age"), Some(30.0));
///
/// #[derive(Deserialize)]
/// struct Add {
///     name: String,
///     age: u32,
/// }
/// let add: Add = args.deserialize().unwrap();
/// assert_eq!(add.age, 30);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    values: Record,
}

impl ParsedArgs {
    pub fn new(values: Record) -> Self {
        Self { values }
    }

    /// Builds from a JSON object; `None` for any other value.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(values) => Some(Self { values }),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// String elements of an array value; non-string elements are skipped.
    pub fn get_strings(&self, key: &str) -> Option<Vec<&str>> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_record(&self) -> &Record {
        &self.values
    }

    pub fn into_record(self) -> Record {
        self.values
    }

    /// Deserializes into a typed options struct.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the values do not fit `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(Value::Object(self.values.clone()))
    }
}

impl From<Record> for ParsedArgs {
    fn from(values: Record) -> Self {
        Self::new(values)
    }
}

//! Value validation for [`ObjectSchema`].
//!
//! Checks an assembled record against its field declarations, collecting
//! every issue instead of stopping at the first one. Defaults are filled in
//! and array elements are coerced to their element type on success.

use regex::Regex;
use serde_json::{Number, Value};

use crate::schema::{Issue, PathSegment, Record, Schema, SchemaNode};
use crate::{ElementType, FieldSchema, FieldType, ObjectSchema};

impl Schema for ObjectSchema {
    fn node(&self) -> SchemaNode<'_> {
        SchemaNode::Object(self)
    }

    /// # Examples
    ///
    /// ```
    /// use command_args_core::{FieldSchema, ObjectSchema, Schema};
    /// use serde_json::json;
    ///
    /// let schema = ObjectSchema::new()
    ///     .field(FieldSchema::string("name"))
    ///     .field(FieldSchema::number("age"));
    ///
    /// let input = json!({ "name": "Alice", "age": "thirty" });
    /// let issues = schema.safe_validate(input.as_object().unwrap()).unwrap_err();
    /// assert_eq!(issues[0].dotted_path(), "age");
    /// assert_eq!(issues[0].message, "Expected number, received string");
    /// ```
    fn safe_validate(&self, input: &Record) -> Result<Record, Vec<Issue>> {
        let mut output = Record::new();
        let mut issues = Vec::new();

        for field in &self.fields {
            match input.get(&field.key) {
                Some(value) => {
                    if let Some(checked) = check_field(field, value, &mut issues) {
                        output.insert(field.key.clone(), checked);
                    }
                }
                None => {
                    if let Some(default) = &field.default {
                        output.insert(field.key.clone(), default.clone());
                    } else if !field.optional {
                        issues.push(field_issue(field, "Required"));
                    }
                }
            }
        }

        for key in input.keys() {
            if self.get(key).is_none() {
                issues.push(Issue::new(Vec::new(), format!("Unrecognized key: {key}")));
            }
        }

        if issues.is_empty() {
            Ok(output)
        } else {
            Err(issues)
        }
    }
}

fn field_issue(field: &FieldSchema, message: impl Into<String>) -> Issue {
    Issue::new([PathSegment::from(field.key.as_str())], message)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn expected(expected: &str, value: &Value) -> String {
    format!("Expected {expected}, received {}", type_name(value))
}

/// Formats a bound without a trailing `.0` for whole numbers.
fn bound(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn check_field(field: &FieldSchema, value: &Value, issues: &mut Vec<Issue>) -> Option<Value> {
    let before = issues.len();

    match field.field_type {
        FieldType::String => match value {
            Value::String(s) => check_string(field, s, issues),
            other => issues.push(field_issue(field, expected("string", other))),
        },
        FieldType::Number => match value.as_f64() {
            Some(n) => check_number(field, n, issues),
            None => issues.push(field_issue(field, expected("number", value))),
        },
        FieldType::Boolean => {
            if !value.is_boolean() {
                issues.push(field_issue(field, expected("boolean", value)));
            }
        }
        FieldType::Array(element) => match value {
            Value::Array(items) => {
                let coerced = check_array(field, element, items, issues);
                return (issues.len() == before).then(|| Value::Array(coerced));
            }
            other => issues.push(field_issue(field, expected("array", other))),
        },
    }

    (issues.len() == before).then(|| value.clone())
}

fn check_string(field: &FieldSchema, s: &str, issues: &mut Vec<Issue>) {
    let len = s.chars().count() as f64;
    if let Some(min) = field.min {
        if len < min {
            issues.push(field_issue(
                field,
                format!("String must contain at least {} character(s)", bound(min)),
            ));
        }
    }
    if let Some(max) = field.max {
        if len > max {
            issues.push(field_issue(
                field,
                format!("String must contain at most {} character(s)", bound(max)),
            ));
        }
    }

    if let Some(pattern) = &field.pattern {
        match Regex::new(pattern) {
            Ok(re) if re.is_match(s) => {}
            Ok(_) => issues.push(field_issue(field, "Invalid")),
            Err(_) => issues.push(field_issue(
                field,
                format!("Invalid regular expression: {pattern}"),
            )),
        }
    }

    if !field.choices.is_empty() && !field.choices.iter().any(|c| c == s) {
        let options = field
            .choices
            .iter()
            .map(|c| format!("'{c}'"))
            .collect::<Vec<_>>()
            .join(" | ");
        issues.push(field_issue(
            field,
            format!("Invalid enum value. Expected {options}, received '{s}'"),
        ));
    }
}

fn check_number(field: &FieldSchema, n: f64, issues: &mut Vec<Issue>) {
    if let Some(min) = field.min {
        if n < min {
            issues.push(field_issue(
                field,
                format!("Number must be greater than or equal to {}", bound(min)),
            ));
        }
    }
    if let Some(max) = field.max {
        if n > max {
            issues.push(field_issue(
                field,
                format!("Number must be less than or equal to {}", bound(max)),
            ));
        }
    }
}

fn check_array(
    field: &FieldSchema,
    element: ElementType,
    items: &[Value],
    issues: &mut Vec<Issue>,
) -> Vec<Value> {
    let len = items.len() as f64;
    if let Some(min) = field.min {
        if len < min {
            issues.push(field_issue(
                field,
                format!("Array must contain at least {} element(s)", bound(min)),
            ));
        }
    }
    if let Some(max) = field.max {
        if len > max {
            issues.push(field_issue(
                field,
                format!("Array must contain at most {} element(s)", bound(max)),
            ));
        }
    }

    let mut coerced = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match coerce_element(element, item) {
            Some(value) => coerced.push(value),
            None => issues.push(Issue::new(
                [PathSegment::from(field.key.as_str()), PathSegment::Index(index)],
                expected(element.name(), item),
            )),
        }
    }
    coerced
}

/// Command-line array elements arrive as strings; numbers and booleans are
/// accepted in either their native or their string form.
fn coerce_element(element: ElementType, item: &Value) -> Option<Value> {
    match (element, item) {
        (ElementType::String, Value::String(_)) => Some(item.clone()),
        (ElementType::Number, Value::Number(_)) => Some(item.clone()),
        (ElementType::Number, Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            if let Ok(int) = trimmed.parse::<i64>() {
                return Some(Value::from(int));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
        }
        (ElementType::Boolean, Value::Bool(_)) => Some(item.clone()),
        (ElementType::Boolean, Value::String(s)) => match s.as_str() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

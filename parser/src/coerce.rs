//! Raw token to typed value conversion.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::descriptor::FieldKind;
use crate::error::ParseError;

/// What to do with a token that does not fit its option's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoercionPolicy {
    /// Pass the original string through and let schema validation report it.
    #[default]
    Lenient,
    /// Fail resolution immediately with [`ParseError::InvalidValue`].
    Strict,
}

/// Converts raw string tokens according to a [`FieldKind`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeCoercer {
    policy: CoercionPolicy,
}

impl TypeCoercer {
    pub fn new(policy: CoercionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> CoercionPolicy {
        self.policy
    }

    /// Coerces `raw`, the value given for `option`.
    ///
    /// Array values are assembled by the resolver; an array kind is treated
    /// as a plain string here.
    pub fn coerce(&self, option: &str, kind: FieldKind, raw: &str) -> Result<Value, ParseError> {
        let coerced = match kind {
            FieldKind::String | FieldKind::Array => return Ok(Value::String(raw.to_string())),
            FieldKind::Number => parse_number(raw),
            FieldKind::Boolean => parse_bool(raw),
        };

        match (coerced, self.policy) {
            (Some(value), _) => Ok(value),
            (None, CoercionPolicy::Lenient) => Ok(Value::String(raw.to_string())),
            (None, CoercionPolicy::Strict) => Err(ParseError::InvalidValue {
                option: option.to_string(),
                expected: if kind == FieldKind::Number {
                    "number"
                } else {
                    "boolean"
                },
                value: raw.to_string(),
            }),
        }
    }
}

/// Integers stay integers so records compare equal to `{"age": 30}`.
fn parse_number(raw: &str) -> Option<Value> {
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Value::from(int));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}

fn parse_bool(raw: &str) -> Option<Value> {
    match raw {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        _ => None,
    }
}

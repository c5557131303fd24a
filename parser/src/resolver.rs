//! Token scanning against a command's option schema.
//!
//! The resolver walks the option tokens left to right. Each token is one of:
//!
//! - a long option, `--key` or `--key=value` (split on the first `=`);
//! - a cluster of short flags, `-xyz` (more than two characters, no `=`),
//!   where every character is resolved as its own `-x` option;
//! - a single short option, `-x` or `-x=value`;
//! - a bare token, which is only valid when an option consumes it.
//!
//! A resolved option takes its value according to its kind: booleans need no
//! value, arrays consume inline comma lists or every following non-flag
//! token, and scalars take the inline value or the next non-flag token.
//! Repeating an option overwrites the earlier value.

use command_args_core::{Record, Schema};
use serde_json::Value;
use tracing::{debug, trace};

use crate::alias::AliasTable;
use crate::args::ParsedArgs;
use crate::bridge::validate_record;
use crate::coerce::TypeCoercer;
use crate::descriptor::{FieldDescriptor, FieldKind, descriptors, unwrap_shape};
use crate::error::{ParseError, Result};

/// Result of resolving one command's options.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Options were resolved and accepted by the schema.
    Success(ParsedArgs),
    /// Resolution or validation failed.
    Failure {
        reason: ParseError,
        /// Whether the command's help should follow the error message.
        show_command_help: bool,
    },
}

impl ParseOutcome {
    pub fn failure(reason: ParseError) -> Self {
        Self::Failure {
            reason,
            show_command_help: true,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

enum Token<'t> {
    Option {
        name: &'t str,
        inline: Option<&'t str>,
    },
    Cluster(&'t str),
    Bare(&'t str),
}

fn classify(token: &str) -> Token<'_> {
    if token.starts_with("--") {
        split_inline(token)
    } else if let Some(flags) = token.strip_prefix('-') {
        if token.chars().count() > 2 && !token.contains('=') {
            Token::Cluster(flags)
        } else {
            split_inline(token)
        }
    } else {
        Token::Bare(token)
    }
}

fn split_inline(token: &str) -> Token<'_> {
    match token.split_once('=') {
        Some((name, value)) => Token::Option {
            name,
            inline: Some(value),
        },
        None => Token::Option {
            name: token,
            inline: None,
        },
    }
}

fn is_flag_shaped(token: &str) -> bool {
    token.starts_with('-')
}

/// Resolves option tokens into a validated record.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentResolver {
    coercer: TypeCoercer,
}

impl ArgumentResolver {
    pub fn new(coercer: TypeCoercer) -> Self {
        Self { coercer }
    }

    /// Resolves `tokens` for `command` and validates the result.
    ///
    /// User mistakes come back as [`ParseOutcome::Failure`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedSchema`](crate::ConfigError::UnsupportedSchema)
    /// if the schema cannot be unwrapped to a field shape.
    pub fn resolve(
        &self,
        command: &str,
        tokens: &[String],
        schema: &dyn Schema,
    ) -> Result<ParseOutcome> {
        let shape = unwrap_shape(command, schema)?;
        let fields = descriptors(shape);
        let table = AliasTable::build(&fields);

        let outcome = match self.scan(tokens, &table) {
            Ok(record) => validate_record(schema, record),
            Err(reason) => {
                debug!(command, error = %reason, "Option resolution failed");
                ParseOutcome::failure(reason)
            }
        };
        Ok(outcome)
    }

    /// Scans tokens into an unvalidated record.
    ///
    /// Tokens consumed as option values are skipped by the scan, so a token
    /// is never interpreted twice. Any token left unconsumed is an
    /// [`ParseError::UnknownArgument`].
    pub fn scan(
        &self,
        tokens: &[String],
        table: &AliasTable<'_>,
    ) -> std::result::Result<Record, ParseError> {
        let mut record = Record::new();
        let mut cursor = 0;

        while cursor < tokens.len() {
            let token = tokens[cursor].as_str();
            cursor += 1;

            match classify(token) {
                Token::Option { name, inline } => {
                    let field = table
                        .lookup(name)
                        .ok_or_else(|| ParseError::UnknownOption(name.to_string()))?;
                    cursor = self.assign(field, name, inline, tokens, cursor, &mut record)?;
                }
                Token::Cluster(flags) => {
                    for flag in flags.chars() {
                        let name = format!("-{flag}");
                        let field = table
                            .lookup(&name)
                            .ok_or_else(|| ParseError::UnknownOption(name.clone()))?;
                        cursor = self.assign(field, &name, None, tokens, cursor, &mut record)?;
                    }
                }
                Token::Bare(arg) => return Err(ParseError::UnknownArgument(arg.to_string())),
            }
        }

        Ok(record)
    }

    /// Stores the value for one resolved option and returns the new cursor.
    fn assign(
        &self,
        field: FieldDescriptor<'_>,
        option: &str,
        inline: Option<&str>,
        tokens: &[String],
        mut cursor: usize,
        record: &mut Record,
    ) -> std::result::Result<usize, ParseError> {
        let value = match field.kind() {
            FieldKind::Boolean => match inline {
                None => Value::Bool(true),
                Some(raw) => self.coercer.coerce(option, FieldKind::Boolean, raw)?,
            },
            FieldKind::Array => match inline {
                Some(raw) => Value::Array(
                    raw.split(',')
                        .map(|item| Value::String(item.to_string()))
                        .collect(),
                ),
                None => {
                    let start = cursor;
                    while cursor < tokens.len() && !is_flag_shaped(&tokens[cursor]) {
                        cursor += 1;
                    }
                    Value::Array(
                        tokens[start..cursor]
                            .iter()
                            .map(|item| Value::String(item.clone()))
                            .collect(),
                    )
                }
            },
            kind => {
                let raw = match inline {
                    Some(raw) => raw,
                    None => match tokens.get(cursor) {
                        Some(next) if !is_flag_shaped(next) => {
                            cursor += 1;
                            next.as_str()
                        }
                        _ => return Err(ParseError::MissingOptionValue(option.to_string())),
                    },
                };
                self.coercer.coerce(option, kind, raw)?
            }
        };

        if record.insert(field.key().to_string(), value).is_some() {
            trace!(key = field.key(), option, "Option repeated; keeping last value");
        }
        Ok(cursor)
    }
}

#[cfg(test)]
mod tests {
    use command_args_core::{ElementType, FieldSchema, ObjectSchema, SchemaExt};
    use serde_json::json;

    use super::*;
    use crate::coerce::CoercionPolicy;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn user_schema() -> ObjectSchema {
        ObjectSchema::new()
            .field(FieldSchema::string("name").alias("n").alias("fullname"))
            .field(FieldSchema::number("age").optional())
    }

    fn flags_schema() -> ObjectSchema {
        ObjectSchema::new()
            .field(FieldSchema::boolean("all").alias("a").optional())
            .field(FieldSchema::boolean("brief").alias("b").optional())
            .field(FieldSchema::boolean("color").alias("c").optional())
            .field(FieldSchema::string("format").alias("f").optional())
            .field(FieldSchema::array("tags", ElementType::String).alias("t").optional())
    }

    fn resolve(schema: &dyn Schema, args: &[&str]) -> ParseOutcome {
        ArgumentResolver::default()
            .resolve("test", &tokens(args), schema)
            .unwrap()
    }

    fn success(value: serde_json::Value) -> ParseOutcome {
        ParseOutcome::Success(ParsedArgs::from_value(value).unwrap())
    }

    fn failure_message(outcome: ParseOutcome) -> String {
        match outcome {
            ParseOutcome::Failure { reason, .. } => reason.to_string(),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_space_and_inline_values_are_equivalent() {
        let schema = user_schema();

        let spaced = resolve(&schema, &["--name", "Alice", "--age", "30"]);
        let inline = resolve(&schema, &["--name=Alice", "--age=30"]);
        assert_eq!(spaced, success(json!({ "name": "Alice", "age": 30 })));
        assert_eq!(spaced, inline);
    }

    #[test]
    fn test_short_and_long_aliases_resolve() {
        let schema = user_schema();

        assert_eq!(
            resolve(&schema, &["-n", "Ann"]),
            success(json!({ "name": "Ann" }))
        );
        assert_eq!(
            resolve(&schema, &["-n=Ann"]),
            success(json!({ "name": "Ann" }))
        );
        assert_eq!(
            resolve(&schema, &["--fullname", "Ann"]),
            success(json!({ "name": "Ann" }))
        );
    }

    #[test]
    fn test_inline_value_splits_on_first_equals() {
        let schema = user_schema();

        assert_eq!(
            resolve(&schema, &["--name=a=b"]),
            success(json!({ "name": "a=b" }))
        );
    }

    #[test]
    fn test_last_occurrence_wins() {
        let schema = user_schema();

        assert_eq!(
            resolve(&schema, &["--name", "Alice", "--name", "Bob"]),
            success(json!({ "name": "Bob" }))
        );
    }

    #[test]
    fn test_combined_short_flags() {
        let schema = flags_schema();

        let combined = resolve(&schema, &["-abc"]);
        assert_eq!(combined, resolve(&schema, &["-a", "-b", "-c"]));
        assert_eq!(
            combined,
            success(json!({ "all": true, "brief": true, "color": true }))
        );
    }

    #[test]
    fn test_combined_flags_with_value_option_consume_next_token() {
        let schema = flags_schema();

        assert_eq!(
            resolve(&schema, &["-af", "json"]),
            success(json!({ "all": true, "format": "json" }))
        );
    }

    #[test]
    fn test_combined_flags_with_value_option_missing_value() {
        let schema = flags_schema();

        assert_eq!(
            failure_message(resolve(&schema, &["-fa"])),
            "Option -f requires a value"
        );
        assert_eq!(
            failure_message(resolve(&schema, &["-af", "--brief"])),
            "Option -f requires a value"
        );
    }

    #[test]
    fn test_combined_flags_unknown_character() {
        let schema = flags_schema();

        assert_eq!(
            failure_message(resolve(&schema, &["-abz"])),
            "Unknown option: -z"
        );
    }

    #[test]
    fn test_omitted_optional_boolean_is_absent() {
        let schema = flags_schema();

        match resolve(&schema, &["--all"]) {
            ParseOutcome::Success(args) => {
                assert_eq!(args.get_bool("all"), Some(true));
                assert!(!args.contains("brief"));
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_boolean_explicit_values() {
        let schema = flags_schema();

        assert_eq!(
            resolve(&schema, &["--all=false", "-b=true"]),
            success(json!({ "all": false, "brief": true }))
        );
    }

    #[test]
    fn test_boolean_with_other_value_fails_validation_when_lenient() {
        let schema = flags_schema();

        assert_eq!(
            failure_message(resolve(&schema, &["--all=yes"])),
            "Argument validation failed:\n  - all: Expected boolean, received string"
        );
    }

    #[test]
    fn test_boolean_never_consumes_next_token() {
        let schema = flags_schema();

        assert_eq!(
            failure_message(resolve(&schema, &["--all", "true"])),
            "Unknown argument: true"
        );
    }

    #[test]
    fn test_array_forms_are_equivalent() {
        let schema = flags_schema();

        let spaced = resolve(&schema, &["--tags", "x", "y"]);
        assert_eq!(spaced, success(json!({ "tags": ["x", "y"] })));
        assert_eq!(spaced, resolve(&schema, &["--tags=x,y"]));
    }

    #[test]
    fn test_array_consumption_stops_at_next_flag() {
        let schema = flags_schema();

        assert_eq!(
            resolve(&schema, &["-t", "x", "y", "-a", "--format", "csv"]),
            success(json!({ "tags": ["x", "y"], "all": true, "format": "csv" }))
        );
    }

    #[test]
    fn test_array_with_no_values_is_empty() {
        let schema = flags_schema();

        assert_eq!(
            resolve(&schema, &["--tags", "--all"]),
            success(json!({ "tags": [], "all": true }))
        );
    }

    #[test]
    fn test_scalar_missing_value() {
        let schema = user_schema();

        assert_eq!(
            failure_message(resolve(&schema, &["--name"])),
            "Option --name requires a value"
        );
        assert_eq!(
            failure_message(resolve(&schema, &["--name", "--age", "3"])),
            "Option --name requires a value"
        );
    }

    #[test]
    fn test_unknown_option_reports_option_name() {
        let schema = user_schema();

        assert_eq!(
            failure_message(resolve(&schema, &["--nmae=Alice"])),
            "Unknown option: --nmae"
        );
    }

    #[test]
    fn test_bare_token_is_unknown_argument() {
        let schema = user_schema();

        assert_eq!(
            failure_message(resolve(&schema, &["--name", "Alice", "extra"])),
            "Unknown argument: extra"
        );
    }

    #[test]
    fn test_missing_required_field_fails_with_path() {
        let schema = user_schema();

        let outcome = resolve(&schema, &["--age", "3"]);
        assert!(matches!(
            outcome,
            ParseOutcome::Failure {
                show_command_help: true,
                ..
            }
        ));
        assert!(failure_message(outcome).contains("  - name: Required"));
    }

    #[test]
    fn test_lenient_number_reaches_validation() {
        let schema = user_schema();

        assert_eq!(
            failure_message(resolve(&schema, &["--name", "A", "--age", "old"])),
            "Argument validation failed:\n  - age: Expected number, received string"
        );
    }

    #[test]
    fn test_strict_number_fails_resolution() {
        let schema = user_schema();
        let resolver = ArgumentResolver::new(TypeCoercer::new(CoercionPolicy::Strict));

        let outcome = resolver
            .resolve("add", &tokens(&["--name", "A", "--age", "old"]), &schema)
            .unwrap();
        assert_eq!(
            failure_message(outcome),
            "Invalid value for --age: expected number, received \"old\""
        );
    }

    #[test]
    fn test_refinement_applies_through_wrapper() {
        let schema = ObjectSchema::new()
            .field(FieldSchema::boolean("force").alias("f").optional())
            .field(FieldSchema::boolean("interactive").alias("i").optional())
            .refine(
                |r| !(r.get("force") == Some(&json!(true)) && r.get("interactive") == Some(&json!(true))),
                "force and interactive cannot be combined",
            );

        assert!(resolve(&schema, &["-f"]).is_success());
        assert!(failure_message(resolve(&schema, &["-fi"]))
            .contains("force and interactive cannot be combined"));
    }
}

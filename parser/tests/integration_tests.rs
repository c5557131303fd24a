use std::cell::RefCell;
use std::rc::Rc;

use command_args::{BufferedOutput, Dispatch, Dispatcher, HandlerResult, ParsedArgs};
use command_args_core::{
    ElementType, FieldSchema, Issue, ObjectSchema, Record, Schema, SchemaExt, SchemaNode,
};
use serde::Deserialize;
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

type Calls = Rc<RefCell<Vec<(String, ParsedArgs)>>>;

fn recorder(calls: Calls, name: &'static str) -> impl Fn(ParsedArgs) -> HandlerResult {
    move |args| {
        calls.borrow_mut().push((name.to_string(), args));
        Ok(())
    }
}

fn add_schema() -> ObjectSchema {
    ObjectSchema::new()
        .describe("Add a user")
        .field(
            FieldSchema::string("name")
                .alias("n")
                .alias("fullname")
                .describe("The user's name"),
        )
        .field(FieldSchema::number("age").describe("Age in years"))
}

fn remove_schema() -> impl Schema {
    ObjectSchema::new()
        .describe("Remove a user")
        .field(FieldSchema::string("name").alias("n"))
        .field(FieldSchema::boolean("force").alias("f").optional())
        .field(FieldSchema::boolean("interactive").alias("i").optional())
        .field(FieldSchema::boolean("verbose").alias("v").optional())
        .refine(
            |r| {
                !(r.get("force") == Some(&json!(true))
                    && r.get("interactive") == Some(&json!(true)))
            },
            "Cannot use --force and --interactive together",
        )
}

fn tag_schema() -> ObjectSchema {
    ObjectSchema::new()
        .describe("Tag an item")
        .field(FieldSchema::array("tags", ElementType::String).alias("t"))
}

fn cli() -> (Dispatcher, Calls) {
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let mut cli = Dispatcher::new();
    cli.add_command("add", add_schema(), recorder(Rc::clone(&calls), "add"), ["a", "new"]);
    cli.add_command("remove", remove_schema(), recorder(Rc::clone(&calls), "remove"), ["rm"]);
    cli.add_command("tag", tag_schema(), recorder(Rc::clone(&calls), "tag"), Vec::<String>::new());
    (cli, calls)
}

fn run(cli: &Dispatcher, args: &[&str]) -> (Dispatch, BufferedOutput) {
    let mut out = BufferedOutput::default();
    let status = cli.parse_with(args.iter().copied(), &mut out).unwrap();
    (status, out)
}

fn expected(value: serde_json::Value) -> ParsedArgs {
    ParsedArgs::from_value(value).unwrap()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn add_with_spaced_values_invokes_handler_once() {
    let (cli, calls) = cli();

    let (status, out) = run(&cli, &["add", "--name", "Alice", "--age", "30"]);
    assert_eq!(status, Dispatch::Executed("add".into()));
    assert!(out.errors.is_empty());

    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "add");
    assert_eq!(calls[0].1, expected(json!({ "name": "Alice", "age": 30 })));
}

#[test]
fn add_with_inline_values_matches_spaced_form() {
    let (cli, calls) = cli();

    run(&cli, &["add", "--name", "Alice", "--age", "30"]);
    run(&cli, &["add", "--name=Alice", "--age=30"]);

    let calls = calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1, calls[1].1);
}

#[test]
fn tags_accept_space_and_comma_forms() {
    let (cli, calls) = cli();

    run(&cli, &["tag", "--tags", "x", "y"]);
    run(&cli, &["tag", "--tags=x,y"]);

    let calls = calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1, expected(json!({ "tags": ["x", "y"] })));
    assert_eq!(calls[0].1, calls[1].1);
}

#[test]
fn no_args_lists_every_command() {
    let (cli, calls) = cli();

    let (status, out) = run(&cli, &[]);
    assert_eq!(status, Dispatch::GlobalHelp);

    let help = out.info_text();
    assert!(help.contains("Available commands:"));
    assert!(help.contains("  add (a, new): Add a user"));
    assert!(help.contains("  remove (rm): Remove a user"));
    assert!(help.contains("  tag: Tag an item"));
    assert!(help.ends_with("Use --help with a command for more details."));
    assert!(calls.borrow().is_empty());
}

#[test]
fn refinement_rejects_force_with_interactive() {
    let (cli, calls) = cli();

    let (status, out) = run(&cli, &["remove", "--name", "bob", "--force", "--interactive"]);
    assert_eq!(status, Dispatch::Rejected("remove".into()));
    assert!(calls.borrow().is_empty());
    assert_eq!(out.errors.len(), 1);
    assert!(out.errors[0].contains("Cannot use --force and --interactive together"));
    assert!(out.info_text().starts_with("Usage: remove [options]"));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn last_occurrence_wins() {
    let (cli, calls) = cli();

    run(&cli, &["add", "--name", "Alice", "--age", "1", "--name", "Bob"]);
    assert_eq!(calls.borrow()[0].1.get_str("name"), Some("Bob"));
}

#[test]
fn combined_short_flags_match_separate_flags() {
    let (cli, calls) = cli();

    run(&cli, &["rm", "-n", "bob", "-fv"]);
    run(&cli, &["rm", "-n", "bob", "-f", "-v"]);

    let calls = calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, "remove");
    assert_eq!(
        calls[0].1,
        expected(json!({ "name": "bob", "force": true, "verbose": true }))
    );
    assert_eq!(calls[0].1, calls[1].1);
}

#[test]
fn omitted_optional_boolean_is_absent() {
    let (cli, calls) = cli();

    run(&cli, &["remove", "--name", "bob"]);
    let calls = calls.borrow();
    assert!(!calls[0].1.contains("force"));
    assert!(!calls[0].1.contains("interactive"));
}

#[test]
fn unknown_command_reports_once_and_shows_global_help() {
    let (cli, calls) = cli();

    let (status, out) = run(&cli, &["deploy", "--name", "x"]);
    assert_eq!(status, Dispatch::UnknownCommand("deploy".into()));
    assert_eq!(out.errors, vec!["Unknown command: deploy".to_string()]);
    assert!(out.info_text().contains("Available commands:"));
    assert!(calls.borrow().is_empty());
}

#[test]
fn missing_required_field_names_its_path() {
    let (cli, calls) = cli();

    let (status, out) = run(&cli, &["add", "--name", "Alice"]);
    assert_eq!(status, Dispatch::Rejected("add".into()));
    assert_eq!(
        out.errors,
        vec!["Argument validation failed:\n  - age: Required".to_string()]
    );
    assert!(calls.borrow().is_empty());
}

#[test]
fn validation_reports_all_issues() {
    let (cli, _calls) = cli();

    let (_, out) = run(&cli, &["add", "--age", "old"]);
    assert_eq!(
        out.error_text(),
        "Argument validation failed:\n  - name: Required\n  - age: Expected number, received string"
    );
}

#[test]
fn resolution_errors_show_command_help() {
    let (cli, calls) = cli();

    for (args, message) in [
        (vec!["add", "--nope"], "Unknown option: --nope"),
        (vec!["add", "--name"], "Option --name requires a value"),
        (vec!["add", "stray"], "Unknown argument: stray"),
        (vec!["rm", "-fz"], "Unknown option: -z"),
    ] {
        let (status, out) = run(&cli, &args);
        assert!(!status.is_success());
        assert_eq!(out.errors, vec![message.to_string()], "args: {args:?}");
        assert!(out.info_text().starts_with("Usage: "));
    }
    assert!(calls.borrow().is_empty());
}

#[test]
fn help_flag_anywhere_after_command_shows_command_help() {
    let (cli, calls) = cli();

    let (status, out) = run(&cli, &["new", "--name", "--help"]);
    assert_eq!(status, Dispatch::CommandHelp("add".into()));
    assert!(out.errors.is_empty());
    assert_eq!(
        out.info_text(),
        [
            "Usage: add [options]",
            "",
            "Add a user",
            "",
            "Options:",
            "  --name (n, fullname) (required): The user's name",
            "  --age (required): Age in years",
            "",
            "Examples:",
        ]
        .join("\n")
    );
    assert!(calls.borrow().is_empty());
}

#[test]
fn leading_help_flag_shows_global_help() {
    let (cli, _calls) = cli();

    let (status, out) = run(&cli, &["--help", "add"]);
    assert_eq!(status, Dispatch::GlobalHelp);
    assert!(out.info_text().starts_with("Available commands:"));
}

#[test]
fn handler_receives_typed_record() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Add {
        name: String,
        age: u8,
    }

    let (cli, calls) = cli();
    run(&cli, &["a", "--fullname", "Zoe", "--age", "41"]);

    let add: Add = calls.borrow()[0].1.deserialize().unwrap();
    assert_eq!(
        add,
        Add {
            name: "Zoe".into(),
            age: 41
        }
    );
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

struct Opaque;

impl Schema for Opaque {
    fn node(&self) -> SchemaNode<'_> {
        SchemaNode::Unsupported("opaque")
    }

    fn safe_validate(&self, input: &Record) -> Result<Record, Vec<Issue>> {
        Ok(input.clone())
    }
}

#[test]
fn unsupported_schema_is_a_configuration_error() {
    let mut cli = Dispatcher::new();
    cli.add_command("sync", Opaque, |_| Ok(()), Vec::<String>::new());

    let mut out = BufferedOutput::default();
    let err = cli.parse_with(["sync"], &mut out).unwrap_err();
    assert_eq!(err.to_string(), "unsupported schema for command sync: opaque");

    // Global help only needs descriptions, so it still works.
    let status = cli.parse_with(Vec::<String>::new(), &mut out).unwrap();
    assert_eq!(status, Dispatch::GlobalHelp);
    assert!(out.info_text().contains("  sync: No description available"));
}

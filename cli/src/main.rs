use std::path::PathBuf;

use clap::Parser;
use command_args::{CommandDefinition, Dispatcher, HandlerResult, ParsedArgs, ParserConfig};
use command_args_core::{ElementType, FieldSchema, ObjectSchema, SchemaExt};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// Process-level flags. Everything after them is handed to the dispatcher
/// untouched, `--help` included.
#[derive(Debug, Parser)]
#[command(name = "tasks")]
#[command(about = "A small task tracker driven by schema-declared commands")]
#[command(disable_help_flag = true)]
struct Cli {
    /// YAML parser configuration (e.g. `coercion: strict`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "error")]
    log_level: String,
    /// Command name followed by its options.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = match &cli.config {
        Some(path) => match ParserConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        },
        None => ParserConfig::default(),
    };
    debug!(?config, "Loaded parser configuration");

    let dispatcher = build_dispatcher(config);
    match dispatcher.parse(cli.args) {
        Ok(status) if status.is_success() => {}
        Ok(_) => std::process::exit(1),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn build_dispatcher(config: ParserConfig) -> Dispatcher {
    let mut dispatcher = Dispatcher::with_config(config);

    dispatcher.register(
        CommandDefinition::new(
            "add",
            ObjectSchema::new()
                .describe("Add a task")
                .field(
                    FieldSchema::string("title")
                        .alias("t")
                        .describe("What needs doing"),
                )
                .field(
                    FieldSchema::number("priority")
                        .alias("p")
                        .min(1.0)
                        .max(5.0)
                        .default_value(3)
                        .describe("1 (low) to 5 (urgent)"),
                )
                .field(
                    FieldSchema::array("tags", ElementType::String)
                        .alias("g")
                        .optional()
                        .describe("Labels, space or comma separated"),
                ),
            run_add,
        )
        .alias("a")
        .alias("new")
        .example("tasks add --title \"Write docs\" -p 4 --tags docs,writing"),
    );

    dispatcher.register(
        CommandDefinition::new(
            "done",
            ObjectSchema::new()
                .describe("Mark a task as finished")
                .field(FieldSchema::number("id").describe("Task number"))
                .field(
                    FieldSchema::boolean("force")
                        .alias("f")
                        .optional()
                        .describe("Skip confirmation"),
                )
                .field(
                    FieldSchema::boolean("interactive")
                        .alias("i")
                        .optional()
                        .describe("Ask before closing"),
                )
                .refine(
                    |record| {
                        !(record.get("force") == Some(&Value::Bool(true))
                            && record.get("interactive") == Some(&Value::Bool(true)))
                    },
                    "Cannot use --force and --interactive together",
                ),
            run_done,
        )
        .alias("close")
        .example("tasks done --id 3 -f"),
    );

    dispatcher.register(
        CommandDefinition::new(
            "list",
            ObjectSchema::new()
                .describe("List tasks")
                .field(
                    FieldSchema::boolean("all")
                        .alias("a")
                        .optional()
                        .describe("Include finished tasks"),
                )
                .field(FieldSchema::boolean("verbose").alias("v").optional())
                .field(
                    FieldSchema::string("status")
                        .alias("s")
                        .choices(["open", "done"])
                        .optional()
                        .describe("Only tasks in this state"),
                ),
            run_list,
        )
        .alias("ls")
        .example("tasks list -av"),
    );

    dispatcher.register(
        CommandDefinition::new(
            "sync",
            ObjectSchema::new()
                .describe("Push tasks to the remote board")
                .field(FieldSchema::string("remote").default_value("origin")),
            run_sync,
        )
        .example("tasks sync --remote backup"),
    );

    dispatcher
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn run_add(args: ParsedArgs) -> HandlerResult {
    let title = args.get_str("title").unwrap_or_default();
    let priority = args.get_i64("priority").unwrap_or(3);
    match args.get_strings("tags") {
        Some(tags) if !tags.is_empty() => {
            println!("Added \"{title}\" (priority {priority}) [{}]", tags.join(", "));
        }
        _ => println!("Added \"{title}\" (priority {priority})"),
    }
    Ok(())
}

fn run_done(args: ParsedArgs) -> HandlerResult {
    let id = args
        .get_i64("id")
        .ok_or_else(|| format!("task id must be a whole number, got {:?}", args.get("id")))?;
    if args.get_bool("interactive").unwrap_or(false) {
        println!("Closing task {id} after confirmation");
    } else {
        println!("Closed task {id}");
    }
    Ok(())
}

fn run_list(args: ParsedArgs) -> HandlerResult {
    println!("{}", serde_json::to_string(args.as_record())?);
    Ok(())
}

fn run_sync(args: ParsedArgs) -> HandlerResult {
    let remote = args.get_str("remote").unwrap_or("origin");
    Err(format!("remote '{remote}' is unreachable").into())
}

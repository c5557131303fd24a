//! The `parse` entry point.
//!
//! Picks the command from the first token, handles `--help`, resolves the
//! remaining options and runs the handler. Every user mistake is written to
//! the error channel and followed by the relevant help text; nothing a user
//! types can make `parse` return an error.

use command_args_core::{Schema, validate_schema};
use tracing::{debug, info, warn};

use crate::args::ParsedArgs;
use crate::coerce::TypeCoercer;
use crate::config::ParserConfig;
use crate::descriptor::unwrap_shape;
use crate::error::{ParseError, Result};
use crate::help::{render_command_help, render_global_help};
use crate::output::{ConsoleOutput, Output};
use crate::registry::{CommandDefinition, CommandRegistry, HandlerResult};
use crate::resolver::{ArgumentResolver, ParseOutcome};

const HELP_FLAG: &str = "--help";

/// What a [`Dispatcher::parse`] call did.
///
/// The dispatcher never exits the process; callers map this to an exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Global help was shown (no arguments or a leading `--help`).
    GlobalHelp,
    /// The first token matched no command; global help was shown.
    UnknownCommand(String),
    /// Help for the named command was shown.
    CommandHelp(String),
    /// Options for the named command were rejected; the handler did not run.
    Rejected(String),
    /// The named command's handler ran and succeeded.
    Executed(String),
    /// The named command's handler ran and returned an error.
    HandlerFailed(String),
}

impl Dispatch {
    /// `true` for help output and successful execution.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Self::GlobalHelp | Self::CommandHelp(_) | Self::Executed(_)
        )
    }
}

/// Command registry plus the pipeline that drives it.
///
/// # Examples
///
/// ```
/// use command_args::{BufferedOutput, Dispatch, Dispatcher};
/// use command_args_core::{FieldSchema, ObjectSchema};
///
/// let mut cli = Dispatcher::new();
/// cli.add_command(
///     "greet",
///     ObjectSchema::new().field(FieldSchema::string("name").alias("n")),
///     |args| {
///         assert_eq!(args.get_str("name"), Some("Ada"));
///         Ok(())
///     },
///     ["hello"],
/// );
///
/// let mut out = BufferedOutput::default();
/// let status = cli.parse_with(["hello", "-n", "Ada"], &mut out).unwrap();
/// assert_eq!(status, Dispatch::Executed("greet".into()));
/// assert!(out.errors.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct Dispatcher {
    registry: CommandRegistry,
    config: ParserConfig,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            registry: CommandRegistry::new(),
            config,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Registers or replaces `name`. See [`CommandRegistry::add_command`].
    pub fn add_command<S, F, I, A>(&mut self, name: &str, schema: S, handler: F, aliases: I)
    where
        S: Schema + 'static,
        F: Fn(ParsedArgs) -> HandlerResult + 'static,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.registry.add_command(name, schema, handler, aliases);
    }

    /// Registers or replaces a prepared definition.
    pub fn register(&mut self, definition: CommandDefinition) {
        self.registry.register(definition);
    }

    /// Parses `args` and writes to stdout/stderr.
    ///
    /// # Errors
    ///
    /// Only for authoring errors; see [`parse_with`](Dispatcher::parse_with).
    pub fn parse<I, S>(&self, args: I) -> Result<Dispatch>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parse_with(args, &mut ConsoleOutput)
    }

    /// Parses `args` and writes to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedSchema`](crate::ConfigError::UnsupportedSchema)
    /// when the selected command's schema cannot be introspected.
    pub fn parse_with<I, S>(&self, args: I, out: &mut dyn Output) -> Result<Dispatch>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        let Some((first, options)) = args.split_first() else {
            out.info(&render_global_help(&self.registry));
            return Ok(Dispatch::GlobalHelp);
        };

        if first == HELP_FLAG {
            out.info(&render_global_help(&self.registry));
            return Ok(Dispatch::GlobalHelp);
        }

        let Some(command) = self.registry.find(first) else {
            debug!(token = %first, "No command matches");
            out.error(&ParseError::UnknownCommand(first.clone()).to_string());
            out.info(&render_global_help(&self.registry));
            return Ok(Dispatch::UnknownCommand(first.clone()));
        };

        if options.iter().any(|arg| arg == HELP_FLAG) {
            out.info(&render_command_help(command)?);
            return Ok(Dispatch::CommandHelp(command.name.clone()));
        }

        self.warn_on_bad_declarations(command)?;

        let resolver = ArgumentResolver::new(TypeCoercer::new(self.config.coercion));
        match resolver.resolve(&command.name, options, command.schema.as_ref())? {
            ParseOutcome::Failure {
                reason,
                show_command_help,
            } => {
                out.error(&reason.to_string());
                if show_command_help {
                    out.info(&render_command_help(command)?);
                }
                Ok(Dispatch::Rejected(command.name.clone()))
            }
            ParseOutcome::Success(parsed) => {
                info!(command = %command.name, options = parsed.len(), "Running command");
                match (command.handler)(parsed) {
                    Ok(()) => Ok(Dispatch::Executed(command.name.clone())),
                    Err(err) => {
                        warn!(command = %command.name, error = %err, "Command handler failed");
                        out.error(&ParseError::HandlerRuntime(err.to_string()).to_string());
                        Ok(Dispatch::HandlerFailed(command.name.clone()))
                    }
                }
            }
        }
    }

    /// Declarations are checked lazily, when a command is dispatched.
    fn warn_on_bad_declarations(&self, command: &CommandDefinition) -> Result<()> {
        let shape = unwrap_shape(&command.name, command.schema.as_ref())?;
        for problem in validate_schema(shape) {
            warn!(command = %command.name, problem = %problem, "Invalid option declaration");
        }
        Ok(())
    }
}

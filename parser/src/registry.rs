//! Command definitions and their registry.

use std::error::Error;
use std::fmt;

use command_args_core::Schema;
use indexmap::IndexMap;
use tracing::debug;

use crate::args::ParsedArgs;

/// What a command handler returns; errors are reported, never propagated.
pub type HandlerResult = Result<(), Box<dyn Error + Send + Sync>>;

/// A command handler.
pub type Handler = Box<dyn Fn(ParsedArgs) -> HandlerResult>;

/// A command: name, aliases, option schema and handler.
///
/// # Examples
///
/// ```
/// use command_args::CommandDefinition;
/// use command_args_core::{FieldSchema, ObjectSchema};
///
/// let add = CommandDefinition::new(
///     "add",
///     ObjectSchema::new().describe("Add a user").field(FieldSchema::string("name")),
///     |_args| Ok(()),
/// )
/// .alias("a")
/// .example("add --name Alice");
///
/// assert!(add.matches("a"));
/// assert_eq!(add.description(), Some("Add a user"));
/// ```
pub struct CommandDefinition {
    pub name: String,
    pub aliases: Vec<String>,
    pub schema: Box<dyn Schema>,
    pub handler: Handler,
    /// Lines shown under "Examples:" in the command help.
    pub examples: Vec<String>,
}

impl CommandDefinition {
    pub fn new<S, F>(name: impl Into<String>, schema: S, handler: F) -> Self
    where
        S: Schema + 'static,
        F: Fn(ParsedArgs) -> HandlerResult + 'static,
    {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            schema: Box::new(schema),
            handler: Box::new(handler),
            examples: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Description taken from the schema.
    pub fn description(&self) -> Option<&str> {
        self.schema.description()
    }

    /// Whether `token` is this command's name or one of its aliases.
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.aliases.iter().any(|a| a == token)
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("examples", &self.examples)
            .finish_non_exhaustive()
    }
}

/// Ordered mapping from command name to definition.
///
/// Registering an existing name replaces the definition in place, keeping
/// its original position in help output. Schemas are not inspected here.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: IndexMap<String, CommandDefinition>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces `name`.
    pub fn add_command<S, F, I, A>(&mut self, name: &str, schema: S, handler: F, aliases: I)
    where
        S: Schema + 'static,
        F: Fn(ParsedArgs) -> HandlerResult + 'static,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let mut definition = CommandDefinition::new(name, schema, handler);
        definition.aliases = aliases.into_iter().map(Into::into).collect();
        self.register(definition);
    }

    /// Registers or replaces a prepared definition.
    pub fn register(&mut self, definition: CommandDefinition) {
        let name = definition.name.clone();
        if self.commands.insert(name.clone(), definition).is_some() {
            debug!(command = %name, "Command re-registered; replacing definition");
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    /// Finds a command by name, then by alias.
    ///
    /// When several commands declare the same alias, the most recently
    /// registered one wins.
    pub fn find(&self, token: &str) -> Option<&CommandDefinition> {
        self.commands.get(token).or_else(|| {
            self.commands
                .values()
                .rev()
                .find(|c| c.aliases.iter().any(|a| a == token))
        })
    }

    /// Definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.commands.values()
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

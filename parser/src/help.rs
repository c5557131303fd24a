//! Help text rendering.

use crate::descriptor::{descriptors, unwrap_shape};
use crate::error::Result;
use crate::registry::{CommandDefinition, CommandRegistry};

const NO_DESCRIPTION: &str = "No description available";

fn alias_suffix(aliases: &[String]) -> String {
    if aliases.is_empty() {
        String::new()
    } else {
        format!(" ({})", aliases.join(", "))
    }
}

/// Lists every registered command with its aliases and description.
pub fn render_global_help(registry: &CommandRegistry) -> String {
    let mut lines = vec!["Available commands:".to_string()];
    for command in registry.iter() {
        lines.push(format!(
            "  {}{}: {}",
            command.name,
            alias_suffix(&command.aliases),
            command.description().unwrap_or(NO_DESCRIPTION)
        ));
    }
    lines.push("Use --help with a command for more details.".to_string());
    lines.join("\n")
}

/// Usage, description, options and examples for one command.
///
/// Options are listed in declaration order; an option is "optional" when its
/// declaration is marked optional (a default implies that).
///
/// # Errors
///
/// Fails when the command's schema cannot be unwrapped to a field shape.
pub fn render_command_help(command: &CommandDefinition) -> Result<String> {
    let shape = unwrap_shape(&command.name, command.schema.as_ref())?;

    let mut lines = vec![
        format!("Usage: {} [options]", command.name),
        String::new(),
        command.description().unwrap_or(NO_DESCRIPTION).to_string(),
        String::new(),
        "Options:".to_string(),
    ];

    for field in descriptors(shape) {
        lines.push(format!(
            "  --{}{} ({}): {}",
            field.key(),
            alias_suffix(field.aliases()),
            if field.is_optional() {
                "optional"
            } else {
                "required"
            },
            field.description().unwrap_or(NO_DESCRIPTION)
        ));
    }

    lines.push(String::new());
    lines.push("Examples:".to_string());
    for example in &command.examples {
        lines.push(format!("  {example}"));
    }

    Ok(lines.join("\n"))
}

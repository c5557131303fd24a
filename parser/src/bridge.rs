//! Hand-off from the resolver to the command's schema.

use command_args_core::{Record, Schema};
use tracing::debug;

use crate::args::ParsedArgs;
use crate::error::{ParseError, ValidationReport};
use crate::resolver::ParseOutcome;

/// Runs the full (still wrapped) schema over an assembled record.
///
/// Refinement layers run here, so cross-field checks apply even though the
/// resolver only saw the unwrapped field shape. Every reported issue ends up
/// in the failure, not just the first.
pub fn validate_record(schema: &dyn Schema, record: Record) -> ParseOutcome {
    match schema.safe_validate(&record) {
        Ok(data) => ParseOutcome::Success(ParsedArgs::new(data)),
        Err(issues) => {
            debug!(issues = issues.len(), "Schema rejected parsed arguments");
            ParseOutcome::Failure {
                reason: ParseError::Validation(ValidationReport { issues }),
                show_command_help: true,
            }
        }
    }
}

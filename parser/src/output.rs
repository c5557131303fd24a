//! Output channels.
//!
//! The dispatcher writes help and informational text to the normal channel
//! and every failure message to the error channel. Where those end up is the
//! caller's choice.

/// A destination with a normal and an error channel.
pub trait Output {
    /// Writes to the normal channel.
    fn info(&mut self, text: &str);
    /// Writes to the error channel.
    fn error(&mut self, text: &str);
}

/// Writes to stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOutput;

impl Output for ConsoleOutput {
    fn info(&mut self, text: &str) {
        println!("{text}");
    }

    fn error(&mut self, text: &str) {
        eprintln!("{text}");
    }
}

/// Keeps everything in memory.
///
/// # Examples
///
/// ```
/// use command_args::{BufferedOutput, Output};
///
/// let mut out = BufferedOutput::default();
/// out.info("Available commands:");
/// out.error("Unknown command: x");
/// assert_eq!(out.info_text(), "Available commands:");
/// assert_eq!(out.errors, vec!["Unknown command: x".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferedOutput {
    pub info: Vec<String>,
    pub errors: Vec<String>,
}

impl BufferedOutput {
    /// Normal-channel writes joined by newlines.
    pub fn info_text(&self) -> String {
        self.info.join("\n")
    }

    /// Error-channel writes joined by newlines.
    pub fn error_text(&self) -> String {
        self.errors.join("\n")
    }
}

impl Output for BufferedOutput {
    fn info(&mut self, text: &str) {
        self.info.push(text.to_string());
    }

    fn error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }
}

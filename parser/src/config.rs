//! Parser configuration.
//!
//! # Example YAML
//!
//! ```yaml
//! coercion: strict
//! ```

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coerce::CoercionPolicy;
use crate::error::Result;

/// Settings that change how option values are resolved.
///
/// # Examples
///
/// ```
/// use command_args::{CoercionPolicy, ParserConfig};
///
/// let config = ParserConfig::from_yaml_str("coercion: strict").unwrap();
/// assert_eq!(config.coercion, CoercionPolicy::Strict);
///
/// assert_eq!(ParserConfig::default().coercion, CoercionPolicy::Lenient);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Handling of numeric/boolean tokens that do not parse.
    pub coercion: CoercionPolicy,
}

impl ParserConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::ConfigError::Io) if the file cannot be read, or
    /// [`Yaml`](crate::ConfigError::Yaml) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Parses configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Yaml`](crate::ConfigError::Yaml) if parsing fails.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

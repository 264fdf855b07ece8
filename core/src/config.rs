//! Parser configuration.
//!
//! Controls the usage header and whether `--help` / `-h` are handled
//! automatically by [`FlagSet::parse`](crate::FlagSet::parse).
//!
//! The type is serde-serializable so hosts that already keep settings in a
//! structured document can embed it; loading such documents is left to them.

use serde::{Deserialize, Serialize};

/// Settings for a [`FlagSet`](crate::FlagSet).
///
/// # Examples
///
/// ```
/// use argflags_core::ParserConfig;
///
/// let config = ParserConfig::default()
///     .with_program_name("sync")
///     .with_description("Synchronize files with a remote server.");
/// assert!(config.auto_help);
/// assert_eq!(config.program_name.as_deref(), Some("sync"));
///
/// let quiet = ParserConfig::default().without_auto_help();
/// assert!(!quiet.auto_help);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Program name shown in usage text. Defaults to the file name of
    /// argument 0.
    pub program_name: Option<String>,
    /// Paragraph printed under the usage line.
    pub description: Option<String>,
    /// Treat `--help` / `-h` as a help request in `parse` when no flag
    /// registers either alias.
    pub auto_help: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            program_name: None,
            description: None,
            auto_help: true,
        }
    }
}

impl ParserConfig {
    pub fn with_program_name(mut self, name: &str) -> Self {
        self.program_name = Some(name.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Disables the automatic `--help` / `-h` handling.
    pub fn without_auto_help(mut self) -> Self {
        self.auto_help = false;
        self
    }
}

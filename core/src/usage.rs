//! Usage text for a flag set.
//!
//! Plain text is what `--help` prints; Markdown, JSON and YAML renderings of
//! the same listing are available for documentation tooling.

use serde::{Deserialize, Serialize};

use crate::error::UsageError;
use crate::registry::FlagSet;
use crate::types::{Alias, FlagKind, FlagSpec};

const DEFAULT_PROGRAM: &str = "program";
const HELP_DOC: &str = "Print this help text and exit.";

/// Supported usage formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageFormat {
    Text,
    Markdown,
    Json,
    Yaml,
}

/// Structured usage listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageDocument {
    pub program: String,
    pub description: Option<String>,
    /// Flags in registration order.
    pub flags: Vec<UsageEntry>,
}

/// One flag in a [`UsageDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEntry {
    /// Aliases in command-line form, primary first.
    pub names: Vec<String>,
    pub required: bool,
    #[serde(flatten)]
    pub kind: FlagKind,
    pub doc: String,
}

impl From<&FlagSpec> for UsageEntry {
    fn from(spec: &FlagSpec) -> Self {
        Self {
            names: spec.display_names(),
            required: spec.is_required(),
            kind: spec.kind().clone(),
            doc: spec.doc().to_string(),
        }
    }
}

impl FlagSet {
    /// Returns the usage listing as data.
    pub fn usage_document(&self) -> UsageDocument {
        self.document_for(None)
    }

    /// Returns the plain-text usage listing.
    ///
    /// # Examples
    ///
    /// ```
    /// use argflags_core::{FlagSet, FlagUse, ParserConfig};
    ///
    /// let mut flags = FlagSet::with_config(ParserConfig::default().with_program_name("sync"));
    /// flags
    ///     .add_int_in('t', FlagUse::Optional, "Connection timeout in ms.", 0, 60000)
    ///     .unwrap();
    ///
    /// let usage = flags.usage();
    /// assert!(usage.starts_with("Usage: sync [FLAGS] [--] [ARGS...]"));
    /// assert!(usage.contains("-t <INT>"));
    /// assert!(usage.contains("range: [0, 60000]"));
    /// ```
    pub fn usage(&self) -> String {
        self.usage_for(None)
    }

    /// Prints [`usage`](Self::usage) to standard output.
    pub fn show_usage(&self) {
        print!("{}", self.usage());
    }

    /// Renders the usage listing in `format`.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError`] if JSON or YAML serialization fails.
    pub fn render_usage(&self, format: UsageFormat) -> Result<String, UsageError> {
        match format {
            UsageFormat::Text => Ok(self.usage()),
            UsageFormat::Markdown => Ok(self.markdown(&self.usage_document())),
            UsageFormat::Json => Ok(serde_json::to_string_pretty(&self.usage_document())?),
            UsageFormat::Yaml => Ok(serde_yaml::to_string(&self.usage_document())?),
        }
    }

    /// Text usage with `program` (from argument 0) as the fallback name.
    pub(crate) fn usage_for(&self, program: Option<&str>) -> String {
        let doc = self.document_for(program);
        let mut out = String::new();

        out.push_str(&format!("Usage: {} [FLAGS] [--] [ARGS...]\n", doc.program));
        if let Some(ref desc) = doc.description {
            out.push_str(&format!("\n{desc}\n"));
        }

        let help = self.help_names();
        if doc.flags.is_empty() && help.is_empty() {
            return out;
        }

        out.push_str("\nFlags:\n");
        for entry in &doc.flags {
            let mut line = format!("  {}", entry.names.join(", "));
            if let Some(hint) = entry.kind.value_hint() {
                line.push_str(&format!(" {hint}"));
            }
            let requiredness = if entry.required { "required" } else { "optional" };
            let mut details = vec![
                requiredness.to_string(),
                entry.kind.type_name().to_string(),
            ];
            details.extend(entry.kind.constraint());
            out.push_str(&format!("{line}  ({})\n", details.join(", ")));
            if !entry.doc.is_empty() {
                out.push_str(&format!("      {}\n", entry.doc));
            }
        }
        if !help.is_empty() {
            out.push_str(&format!("  {}\n      {HELP_DOC}\n", help.join(", ")));
        }

        out
    }

    fn markdown(&self, doc: &UsageDocument) -> String {
        let mut out = String::new();

        out.push_str(&format!("# {}\n\n", doc.program));
        if let Some(ref desc) = doc.description {
            out.push_str(&format!("{desc}\n\n"));
        }

        out.push_str("| Flag | Type | Required | Description |\n");
        out.push_str("|------|------|----------|-------------|\n");
        for entry in &doc.flags {
            let names = entry
                .names
                .iter()
                .map(|n| format!("`{n}`"))
                .collect::<Vec<_>>()
                .join(", ");
            let ty = match entry.kind.constraint() {
                Some(constraint) => format!("{} ({constraint})", entry.kind.type_name()),
                None => entry.kind.type_name().to_string(),
            };
            let required = if entry.required { "yes" } else { "no" };
            out.push_str(&format!("| {names} | {ty} | {required} | {} |\n", entry.doc));
        }

        out
    }

    fn document_for(&self, program: Option<&str>) -> UsageDocument {
        let program = self
            .config()
            .program_name
            .as_deref()
            .or(program)
            .unwrap_or(DEFAULT_PROGRAM);
        UsageDocument {
            program: program.to_string(),
            description: self.config().description.clone(),
            flags: self.specs().map(UsageEntry::from).collect(),
        }
    }

    /// The automatic help aliases, empty when help handling is off.
    fn help_names(&self) -> Vec<String> {
        if !self.help_enabled() {
            return Vec::new();
        }
        [Alias::Long("help".to_string()), Alias::Short('h')]
            .iter()
            .map(Alias::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::types::FlagUse;

    fn sync_flags() -> FlagSet {
        let mut flags = FlagSet::with_config(
            ParserConfig::default()
                .with_program_name("sync")
                .with_description("Synchronize files."),
        );
        flags
            .add_string("hostname", FlagUse::Required, "Hostname of the server.")
            .unwrap();
        flags
            .add_enum(
                ("protocol", 'p'),
                FlagUse::Required,
                "Protocol to use.",
                ["http", "ftp", "https"],
            )
            .unwrap();
        flags
            .add_int_in('t', FlagUse::Optional, "Timeout in ms.", 0, 60000)
            .unwrap();
        flags
            .add_bool(("verbose", 'v'), FlagUse::Optional, "Enable verbose logging.")
            .unwrap();
        flags
    }

    #[test]
    fn test_text_usage_lists_flags_in_order() {
        let usage = sync_flags().usage();
        let expected = "\
Usage: sync [FLAGS] [--] [ARGS...]

Synchronize files.

Flags:
  --hostname <STRING>  (required, string)
      Hostname of the server.
  --protocol, -p <http|ftp|https>  (required, enum, one of: http, ftp, https)
      Protocol to use.
  -t <INT>  (optional, int, range: [0, 60000])
      Timeout in ms.
  --verbose, -v  (optional, bool)
      Enable verbose logging.
  --help, -h
      Print this help text and exit.
";
        assert_eq!(usage, expected);
    }

    #[test]
    fn test_program_falls_back_to_arg0_then_default() {
        let flags = FlagSet::new();
        assert!(flags.usage().starts_with("Usage: program "));
        assert!(flags.usage_for(Some("tool")).starts_with("Usage: tool "));
    }

    #[test]
    fn test_claimed_help_alias_hides_help_line() {
        let mut flags = FlagSet::new();
        flags
            .add_string(('h', "host"), FlagUse::Optional, "Host.")
            .unwrap();
        let usage = flags.usage();
        assert!(usage.contains("  -h, --host <STRING>"));
        assert!(!usage.contains("--help"));
        assert!(!usage.contains(HELP_DOC));
    }

    #[test]
    fn test_markdown_table() {
        let md = sync_flags().render_usage(UsageFormat::Markdown).unwrap();
        assert!(md.starts_with("# sync\n"));
        assert!(md.contains("| `-t` | int (range: [0, 60000]) | no | Timeout in ms. |"));
        assert!(md.contains("| `--verbose`, `-v` | bool | no | Enable verbose logging. |"));
    }

    #[test]
    fn test_json_document() {
        let json = sync_flags().render_usage(UsageFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["program"], "sync");
        assert_eq!(value["flags"][1]["type"], "enum");
        assert_eq!(value["flags"][1]["allowed"][2], "https");
        assert_eq!(value["flags"][2]["min"], 0);
        assert_eq!(value["flags"][0]["required"], true);
    }

    #[test]
    fn test_yaml_document_parses_back() {
        let flags = sync_flags();
        let yaml = flags.render_usage(UsageFormat::Yaml).unwrap();
        let doc: UsageDocument = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(doc, flags.usage_document());
    }
}

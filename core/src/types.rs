//! Flag type definitions.
//!
//! This module defines the data model shared by registration, matching and
//! usage rendering: the names a flag answers to ([`Alias`], [`FlagName`]), its
//! declared value type and constraints ([`FlagKind`]), and the immutable
//! [`FlagSpec`] the registry keeps for every flag.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One name a flag may be referenced by on the command line.
///
/// Short aliases are written `-x`, long aliases `--name`.
///
/// # Examples
///
/// ```
/// use argflags_core::Alias;
///
/// assert_eq!(Alias::from('p').to_string(), "-p");
/// assert_eq!(Alias::from("protocol").to_string(), "--protocol");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alias {
    /// Single ASCII alphanumeric character (e.g. `-v`).
    Short(char),
    /// Name made of ASCII alphanumerics, `_` and `-` (e.g. `--verbose`).
    Long(String),
}

impl Alias {
    /// The alias of the other kind spelled with the same text, if one can exist.
    ///
    /// Long and short names share a namespace for collision purposes, so a
    /// long name `"v"` conflicts with a short name `'v'`.
    pub(crate) fn counterpart(&self) -> Option<Alias> {
        match self {
            Alias::Short(c) => Some(Alias::Long(c.to_string())),
            Alias::Long(name) => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Alias::Short(c)),
                    _ => None,
                }
            }
        }
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alias::Short(c) => write!(f, "-{c}"),
            Alias::Long(name) => write!(f, "--{name}"),
        }
    }
}

impl From<char> for Alias {
    fn from(c: char) -> Self {
        Alias::Short(c)
    }
}

impl From<&str> for Alias {
    fn from(name: &str) -> Self {
        Alias::Long(name.to_string())
    }
}

impl From<String> for Alias {
    fn from(name: String) -> Self {
        Alias::Long(name)
    }
}

/// The ordered set of aliases for a single flag.
///
/// The first alias is the flag's primary name, used in usage text and error
/// messages. Conversions exist for the common literal shapes: a single
/// character, a single string, a `(long, short)` / `(short, long)` pair, or a
/// list of [`Alias`] values.
///
/// # Examples
///
/// ```
/// use argflags_core::{Alias, FlagName};
///
/// let name = FlagName::from(("protocol", 'p'));
/// assert_eq!(name.primary(), Some(&Alias::Long("protocol".into())));
/// assert_eq!(name.aliases().len(), 2);
///
/// let name = FlagName::from(('t', "timeout"));
/// assert_eq!(name.primary(), Some(&Alias::Short('t')));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagName {
    aliases: Vec<Alias>,
}

impl FlagName {
    /// Creates a name from an ordered list of aliases.
    pub fn new(aliases: impl IntoIterator<Item = Alias>) -> Self {
        Self {
            aliases: aliases.into_iter().collect(),
        }
    }

    pub fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    /// Returns the primary (first) alias.
    pub fn primary(&self) -> Option<&Alias> {
        self.aliases.first()
    }
}

impl From<Alias> for FlagName {
    fn from(alias: Alias) -> Self {
        Self {
            aliases: vec![alias],
        }
    }
}

impl From<char> for FlagName {
    fn from(c: char) -> Self {
        Alias::from(c).into()
    }
}

impl From<&str> for FlagName {
    fn from(name: &str) -> Self {
        Alias::from(name).into()
    }
}

impl From<String> for FlagName {
    fn from(name: String) -> Self {
        Alias::from(name).into()
    }
}

impl From<(&str, char)> for FlagName {
    fn from((long, short): (&str, char)) -> Self {
        Self::new([Alias::from(long), Alias::from(short)])
    }
}

impl From<(char, &str)> for FlagName {
    fn from((short, long): (char, &str)) -> Self {
        Self::new([Alias::from(short), Alias::from(long)])
    }
}

impl From<Vec<Alias>> for FlagName {
    fn from(aliases: Vec<Alias>) -> Self {
        Self { aliases }
    }
}

impl<const N: usize> From<[Alias; N]> for FlagName {
    fn from(aliases: [Alias; N]) -> Self {
        Self::new(aliases)
    }
}

/// Whether a flag must be supplied on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagUse {
    /// Parsing fails with `MissingRequiredFlag` when the flag is absent.
    Required,
    /// The flag may be omitted.
    Optional,
}

/// Declared value type of a flag, with its type-specific constraints.
///
/// # Examples
///
/// ```
/// use argflags_core::FlagKind;
///
/// let kind = FlagKind::Int { min: 0, max: 60000 };
/// assert_eq!(kind.type_name(), "int");
/// assert!(!kind.is_bool());
/// assert!(FlagKind::Bool.is_bool());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FlagKind {
    /// Arbitrary string, stored verbatim.
    String,
    /// One of a fixed set of strings (case-sensitive).
    Enum { allowed: Vec<String> },
    /// Base-10 integer within an inclusive range.
    Int { min: i64, max: i64 },
    /// Boolean; presence alone means `true`.
    Bool,
}

impl FlagKind {
    /// Short lowercase name of the type.
    pub fn type_name(&self) -> &'static str {
        match self {
            FlagKind::String => "string",
            FlagKind::Enum { .. } => "enum",
            FlagKind::Int { .. } => "int",
            FlagKind::Bool => "bool",
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, FlagKind::Bool)
    }

    /// Placeholder shown after the flag names in usage text.
    pub fn value_hint(&self) -> Option<String> {
        match self {
            FlagKind::String => Some("<STRING>".to_string()),
            FlagKind::Enum { allowed } => Some(format!("<{}>", allowed.join("|"))),
            FlagKind::Int { .. } => Some("<INT>".to_string()),
            FlagKind::Bool => None,
        }
    }

    /// Human-readable constraint, if the kind carries a meaningful one.
    ///
    /// Unbounded integer flags report no constraint.
    pub fn constraint(&self) -> Option<String> {
        match self {
            FlagKind::Enum { allowed } => Some(format!("one of: {}", allowed.join(", "))),
            FlagKind::Int { min, max } if (*min, *max) != (i64::MIN, i64::MAX) => {
                Some(format!("range: [{min}, {max}]"))
            }
            _ => None,
        }
    }
}

/// Immutable specification of a registered flag.
///
/// Created by the `add_*` methods of [`FlagSet`](crate::FlagSet) and owned by
/// it; matching and coercion only ever borrow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    aliases: Vec<Alias>,
    kind: FlagKind,
    flag_use: FlagUse,
    doc: String,
}

impl FlagSpec {
    /// Builds a spec. Callers guarantee `aliases` is non-empty.
    pub(crate) fn new(aliases: Vec<Alias>, kind: FlagKind, flag_use: FlagUse, doc: &str) -> Self {
        debug_assert!(!aliases.is_empty());
        Self {
            aliases,
            kind,
            flag_use,
            doc: doc.to_string(),
        }
    }

    /// The primary alias (first name given at registration).
    pub fn primary(&self) -> &Alias {
        &self.aliases[0]
    }

    pub fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    pub fn kind(&self) -> &FlagKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.flag_use == FlagUse::Required
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// The primary alias in command-line form (`--protocol`, `-t`).
    ///
    /// Error messages refer to flags by this name.
    pub fn display_name(&self) -> String {
        self.primary().to_string()
    }

    /// All aliases in command-line form, in registration order.
    pub fn display_names(&self) -> Vec<String> {
        self.aliases.iter().map(ToString::to_string).collect()
    }
}

/// A coerced flag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// Value of a string or enum flag.
    Str(String),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Str(s) => f.write_str(s),
            FlagValue::Int(i) => write!(f, "{i}"),
            FlagValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

//! Error types for flag registration, parsing and access.
//!
//! Registration mistakes are programmer errors and surface from the `add_*`
//! call that made them. Bad user input surfaces as a [`ParseError`] from the
//! parse entry points. Reading a flag at the wrong time is an [`AccessError`].

use thiserror::Error;

/// Errors raised while registering a flag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagSpecificationError {
    /// The flag was given no names at all.
    #[error("flag must define at least one name")]
    EmptyName,
    /// A name is already taken by another flag (or repeated in the same set).
    #[error("duplicate flag name: {0}")]
    DuplicateAlias(String),
    /// Short names must be a single ASCII alphanumeric character.
    #[error("invalid short flag name: {0:?}")]
    InvalidShortName(char),
    /// Long names must be non-empty and use only `[A-Za-z0-9_-]`.
    #[error("invalid long flag name: {0:?}")]
    InvalidLongName(String),
    /// Integer bounds with `min > max`.
    #[error("invalid range for flag {flag}: minimum {min} is greater than maximum {max}")]
    InvalidRange { flag: String, min: i64, max: i64 },
    /// Enum flag declared without allowed values.
    #[error("enum flag {0} must allow at least one value")]
    EmptyEnumValues(String),
}

/// Errors raised by flag accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// No parse has completed on the flag set yet.
    #[error("command line has not been parsed")]
    CommandLineNotParsed,
    /// The flag was not supplied on the command line.
    #[error("flag {0} was not passed")]
    FlagNotPassed(String),
    /// The handle was issued by a different flag set.
    #[error("flag handle does not belong to this flag set")]
    ForeignHandle,
}

/// Errors raised while parsing a command line.
///
/// Flags are named by their primary alias in command-line form
/// (`--protocol`, `-t`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A flag-like token names no registered flag.
    #[error("unknown flag: {token}")]
    UnknownFlag { token: String },
    /// A value-taking short flag appears before the end of a squashed group.
    #[error("flag {flag} takes a value and must be last in -{cluster}")]
    AmbiguousShortFlag { flag: String, cluster: String },
    /// A value-taking flag is the last argument.
    #[error("flag {flag} requires a value")]
    MissingValue { flag: String },
    /// The value does not parse as the flag's type or is not an allowed value.
    #[error("invalid value {value:?} for flag {flag}: {reason}")]
    InvalidValue {
        flag: String,
        value: String,
        reason: String,
    },
    /// An integer value lies outside the declared bounds.
    #[error("value {value} for flag {flag} is out of range [{min}, {max}]")]
    OutOfRange {
        flag: String,
        value: String,
        min: i64,
        max: i64,
    },
    /// The flag was given a value more than once.
    #[error("flag {flag} was passed more than once")]
    DuplicateFlag { flag: String },
    /// A required flag was never supplied.
    #[error("missing required flag {flag}")]
    MissingRequiredFlag { flag: String },
    /// A process argument is not valid UTF-8; `argument` is its lossy form.
    #[error("argument is not valid UTF-8: {argument:?}")]
    NonUnicodeArgument { argument: String },
}

impl ParseError {
    /// Returns the primary name of the flag the error is about.
    ///
    /// `UnknownFlag` and `NonUnicodeArgument` refer to no registered flag and
    /// return `None`.
    pub fn failed_flag(&self) -> Option<&str> {
        match self {
            ParseError::UnknownFlag { .. } | ParseError::NonUnicodeArgument { .. } => None,
            ParseError::AmbiguousShortFlag { flag, .. }
            | ParseError::MissingValue { flag }
            | ParseError::InvalidValue { flag, .. }
            | ParseError::OutOfRange { flag, .. }
            | ParseError::DuplicateFlag { flag }
            | ParseError::MissingRequiredFlag { flag } => Some(flag),
        }
    }

    /// Human-readable description of the failure.
    pub fn description(&self) -> String {
        self.to_string()
    }
}

/// Errors raised while rendering usage in a structured format.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Specification(#[from] FlagSpecificationError),
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Usage(#[from] UsageError),
}

/// Convenience alias for results with [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

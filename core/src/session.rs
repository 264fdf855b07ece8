//! Parse sessions and the `FlagSet` parse entry points.
//!
//! A session borrows the flag set read-only, scans the arguments left to
//! right and collects bindings privately. Only a completed session is
//! committed back to the set, so a failed parse leaves both the argument
//! vector and any earlier results untouched.

use std::ffi::OsString;
use std::path::Path;

use tracing::{debug, trace};

use crate::coerce::coerce;
use crate::error::ParseError;
use crate::matcher::{Match, RawValue, match_long, match_short};
use crate::registry::FlagSet;
use crate::token::{Token, Tokenizer};
use crate::types::FlagValue;

/// Result of a successful call to [`FlagSet::parse_with_help`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// All flags bound; the argument vector now holds only positionals.
    Completed,
    /// `--help` or `-h` was found; nothing was bound.
    HelpRequested,
}

enum Outcome {
    Completed {
        bindings: Vec<Option<FlagValue>>,
        positionals: Vec<String>,
    },
    HelpRequested,
}

struct ParseSession<'s> {
    flags: &'s FlagSet,
    handle_help: bool,
    bindings: Vec<Option<FlagValue>>,
    positionals: Vec<String>,
}

impl<'s> ParseSession<'s> {
    fn new(flags: &'s FlagSet, handle_help: bool) -> Self {
        Self {
            flags,
            handle_help,
            bindings: vec![None; flags.len()],
            positionals: Vec::new(),
        }
    }

    fn run(mut self, args: &[String]) -> Result<Outcome, ParseError> {
        let mut tokens = Tokenizer::new(args);

        while let Some(token) = tokens.next() {
            trace!(?token, "Scanning token");
            if self.is_help(token) {
                debug!("Help requested");
                return Ok(Outcome::HelpRequested);
            }

            match token {
                Token::Long { name, value } => {
                    let m = match_long(self.flags, name, value)?;
                    self.bind(m, &mut tokens)?;
                }
                Token::Short { cluster, value } => {
                    for m in match_short(self.flags, cluster, value)? {
                        self.bind(m, &mut tokens)?;
                    }
                }
                Token::Positional(arg) => self.positionals.push(arg.to_string()),
                Token::Terminator => trace!("Terminator reached"),
            }
        }

        self.check_required()?;
        Ok(Outcome::Completed {
            bindings: self.bindings,
            positionals: self.positionals,
        })
    }

    fn is_help(&self, token: Token<'_>) -> bool {
        self.handle_help
            && matches!(
                token,
                Token::Long {
                    name: "help",
                    value: None
                } | Token::Short {
                    cluster: "h",
                    value: None
                }
            )
    }

    fn bind<'a>(&mut self, m: Match<'a>, tokens: &mut Tokenizer<'a>) -> Result<(), ParseError> {
        let spec = self.flags.spec(m.id);
        if self.bindings[m.id.0].is_some() {
            return Err(ParseError::DuplicateFlag {
                flag: spec.display_name(),
            });
        }

        let raw = match m.value {
            RawValue::Explicit(v) => Some(v),
            RawValue::Implicit => None,
            RawValue::FromNext => {
                Some(tokens.take_value().ok_or_else(|| ParseError::MissingValue {
                    flag: spec.display_name(),
                })?)
            }
        };

        let value = coerce(spec, raw)?;
        debug!(flag = %spec.display_name(), %value, "Bound flag");
        self.bindings[m.id.0] = Some(value);
        Ok(())
    }

    /// Reports the first missing required flag in registration order.
    fn check_required(&self) -> Result<(), ParseError> {
        let missing = self
            .flags
            .specs()
            .zip(&self.bindings)
            .find(|(spec, value)| spec.is_required() && value.is_none());
        match missing {
            Some((spec, _)) => Err(ParseError::MissingRequiredFlag {
                flag: spec.display_name(),
            }),
            None => Ok(()),
        }
    }
}

impl FlagSet {
    /// Parses `args` (argument 0 first) without exiting the process.
    ///
    /// On success `args` is rewritten to argument 0 followed by the
    /// positional arguments in their original order, and all flags become
    /// readable. On failure `args` and the flag set are left untouched.
    /// `--help` and `-h` get no special treatment here.
    ///
    /// # Examples
    ///
    /// ```
    /// use argflags_core::{FlagSet, FlagUse, ParseError};
    ///
    /// let mut flags = FlagSet::new();
    /// flags
    ///     .add_enum(("protocol", 'p'), FlagUse::Required, "", ["http", "ftp", "https"])
    ///     .unwrap();
    ///
    /// let mut args: Vec<String> = vec!["prog".into(), "-p".into(), "gopher".into()];
    /// let err = flags.try_parse(&mut args).unwrap_err();
    /// assert!(matches!(err, ParseError::InvalidValue { .. }));
    /// assert_eq!(err.failed_flag(), Some("--protocol"));
    /// assert_eq!(args.len(), 3);
    /// ```
    pub fn try_parse(&mut self, args: &mut Vec<String>) -> Result<(), ParseError> {
        self.run_session(args, false).map(|_| ())
    }

    /// Like [`try_parse`](Self::try_parse), but reports `--help` or `-h` as
    /// [`ParseStatus::HelpRequested`] when
    /// [`auto_help`](crate::ParserConfig::auto_help) is enabled and no flag
    /// registers either alias.
    pub fn parse_with_help(&mut self, args: &mut Vec<String>) -> Result<ParseStatus, ParseError> {
        let handle_help = self.help_enabled();
        self.run_session(args, handle_help)
    }

    /// Parses `args`, exiting the process on errors and help requests.
    ///
    /// Errors print a diagnostic and the usage text to standard error and
    /// exit with status 1. A `--help` / `-h` help request prints the usage text
    /// to standard output and exits with status 0.
    pub fn parse(&mut self, args: &mut Vec<String>) {
        let program = args.first().map(|arg0| program_name(arg0));
        match self.parse_with_help(args) {
            Ok(ParseStatus::Completed) => {}
            Ok(ParseStatus::HelpRequested) => {
                print!("{}", self.usage_for(program.as_deref()));
                std::process::exit(0);
            }
            Err(e) => self.exit_with_error(program.as_deref(), &e),
        }
    }

    fn exit_with_error(&self, program: Option<&str>, error: &ParseError) -> ! {
        eprintln!("error: {error}");
        eprint!("{}", self.usage_for(program));
        std::process::exit(1)
    }

    /// Parses the process arguments with [`parse`](Self::parse) and returns
    /// argument 0 followed by the positional arguments.
    ///
    /// An argument that is not valid UTF-8 is reported like any other parse
    /// error (exit status 1) rather than being converted lossily.
    pub fn parse_env(&mut self) -> Vec<String> {
        let mut args = match collect_args(std::env::args_os()) {
            Ok(args) => args,
            Err(e) => {
                let program = std::env::args_os()
                    .next()
                    .map(|arg0| program_name(&arg0.to_string_lossy()));
                self.exit_with_error(program.as_deref(), &e)
            }
        };
        self.parse(&mut args);
        args
    }

    fn run_session(
        &mut self,
        args: &mut Vec<String>,
        handle_help: bool,
    ) -> Result<ParseStatus, ParseError> {
        let rest = args.get(1..).unwrap_or_default();
        debug!(args = rest.len(), flags = self.len(), "Starting parse session");

        let outcome = ParseSession::new(self, handle_help)
            .run(rest)
            .inspect_err(|e| debug!(error = %e, "Parse session failed"))?;

        match outcome {
            Outcome::HelpRequested => Ok(ParseStatus::HelpRequested),
            Outcome::Completed {
                bindings,
                positionals,
            } => {
                debug!(positionals = positionals.len(), "Parse session completed");
                self.commit(bindings);
                args.truncate(1);
                args.extend(positionals);
                Ok(ParseStatus::Completed)
            }
        }
    }
}

/// Converts raw process arguments, failing on the first one that is not
/// valid UTF-8.
pub(crate) fn collect_args(
    args: impl IntoIterator<Item = OsString>,
) -> Result<Vec<String>, ParseError> {
    args.into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| ParseError::NonUnicodeArgument {
                    argument: arg.to_string_lossy().into_owned(),
                })
        })
        .collect()
}

/// File name component of argument 0, for usage headers.
pub(crate) fn program_name(arg0: &str) -> String {
    Path::new(arg0)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| arg0.to_string())
}

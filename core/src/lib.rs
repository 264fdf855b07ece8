//! Command-line flag parsing.
//!
//! Programs declare their flags on a [`FlagSet`], parse the argument vector
//! once at startup, and read typed values back through the handles returned
//! at registration:
//!
//! - [`FlagSet::add_string`], [`FlagSet::add_enum`], [`FlagSet::add_int`] /
//!   [`FlagSet::add_int_in`] and [`FlagSet::add_bool`] register flags and
//!   reject bad names, duplicate names and impossible constraints up front.
//! - [`FlagSet::parse`] exits the process on bad input (status 1) or an
//!   `--help` / `-h` (status 0); [`FlagSet::try_parse`] returns a
//!   [`ParseError`] instead and leaves the arguments untouched.
//! - After a successful parse the argument vector holds argument 0 followed
//!   by the positional arguments.
//!
//! Accepted syntax: `--name=value`, `--name value`, `-n=value`, `-n value`,
//! `--flag` / `-f` for booleans, squashed short booleans (`-laHrt`, where only
//! the last letter may take a value), and `--` to end flag parsing. Each
//! argument is taken as the shell delivered it; values are never re-split on
//! whitespace.
//!
//! # Example
//!
//! ```
//! use argflags_core::*;
//!
//! let mut flags = FlagSet::new();
//! let hostname = flags
//!     .add_string("hostname", FlagUse::Required, "Hostname of the synchronization server.")
//!     .unwrap();
//! let protocol = flags
//!     .add_enum(("protocol", 'p'), FlagUse::Required, "Synchronization protocol to use.",
//!               ["http", "ftp", "https"])
//!     .unwrap();
//! let timeout_ms = flags
//!     .add_int_in('t', FlagUse::Optional, "Connection timeout in ms.", 0, 60000)
//!     .unwrap();
//! let verbose = flags
//!     .add_bool(("verbose", 'v'), FlagUse::Optional, "Enable verbose logging?")
//!     .unwrap();
//!
//! let mut args: Vec<String> =
//!     ["prog", "--hostname=example.com", "-p", "https", "extra1", "extra2"]
//!         .iter()
//!         .map(|s| s.to_string())
//!         .collect();
//! flags.try_parse(&mut args).unwrap();
//!
//! assert_eq!(hostname.get(&flags).unwrap(), "example.com");
//! assert_eq!(protocol.get(&flags).unwrap(), "https");
//! assert!(!timeout_ms.present(&flags).unwrap());
//! assert!(!verbose.present(&flags).unwrap());
//! assert_eq!(args, vec!["prog", "extra1", "extra2"]);
//! ```

mod coerce;
mod config;
mod error;
mod matcher;
mod names;
mod registry;
mod session;
mod token;
mod types;
mod usage;

pub use config::ParserConfig;
pub use error::{AccessError, Error, FlagSpecificationError, ParseError, Result, UsageError};
pub use registry::{BoolFlag, EnumFlag, Flag, FlagSet, FlagValueType, IntFlag, StringFlag};
pub use session::ParseStatus;
pub use types::*;
pub use usage::{UsageDocument, UsageEntry, UsageFormat};

//! Flag registration and typed access to parsed values.
//!
//! A [`FlagSet`] owns every flag's [`FlagSpec`] and runtime state. The
//! `add_*` methods hand back lightweight typed handles ([`Flag<T>`]) whose
//! `get` and `present` read through the set that issued them.

use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::config::ParserConfig;
use crate::error::{AccessError, FlagSpecificationError};
use crate::names::{FlagId, NameTable};
use crate::types::{FlagKind, FlagName, FlagSpec, FlagUse, FlagValue};

static NEXT_SET_ID: AtomicU64 = AtomicU64::new(1);

/// Runtime record of one flag; `value` is `Some` once the flag is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FlagState {
    pub(crate) value: Option<FlagValue>,
}

impl FlagState {
    pub(crate) fn present(&self) -> bool {
        self.value.is_some()
    }
}

/// Registry of declared flags and their parsed values.
///
/// # Examples
///
/// ```
/// use argflags_core::{FlagSet, FlagUse};
///
/// let mut flags = FlagSet::new();
/// let timeout = flags
///     .add_int_in('t', FlagUse::Optional, "Connection timeout in ms.", 0, 60000)
///     .unwrap();
/// let verbose = flags
///     .add_bool(("verbose", 'v'), FlagUse::Optional, "Enable verbose logging.")
///     .unwrap();
///
/// let mut args: Vec<String> = ["prog", "-t", "250", "file.txt"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// flags.try_parse(&mut args).unwrap();
///
/// assert_eq!(timeout.get(&flags).unwrap(), 250);
/// assert!(!verbose.present(&flags).unwrap());
/// assert_eq!(args, vec!["prog", "file.txt"]);
/// ```
#[derive(Debug)]
pub struct FlagSet {
    id: u64,
    config: ParserConfig,
    names: NameTable,
    specs: Vec<FlagSpec>,
    states: Vec<FlagState>,
    parsed: bool,
}

impl Default for FlagSet {
    fn default() -> Self {
        Self::with_config(ParserConfig::default())
    }
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            id: NEXT_SET_ID.fetch_add(1, Ordering::Relaxed),
            config,
            names: NameTable::default(),
            specs: Vec::new(),
            states: Vec::new(),
            parsed: false,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Registers a string flag.
    pub fn add_string(
        &mut self,
        name: impl Into<FlagName>,
        flag_use: FlagUse,
        doc: &str,
    ) -> Result<StringFlag, FlagSpecificationError> {
        self.register(name.into(), FlagKind::String, flag_use, doc)
    }

    /// Registers an enum flag accepting exactly one of `allowed` (case-sensitive).
    ///
    /// # Errors
    ///
    /// Returns [`EmptyEnumValues`](FlagSpecificationError::EmptyEnumValues)
    /// when `allowed` is empty, plus any name error.
    pub fn add_enum<I, S>(
        &mut self,
        name: impl Into<FlagName>,
        flag_use: FlagUse,
        doc: &str,
        allowed: I,
    ) -> Result<EnumFlag, FlagSpecificationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed = allowed.into_iter().map(Into::into).collect();
        self.register(name.into(), FlagKind::Enum { allowed }, flag_use, doc)
    }

    /// Registers an integer flag accepting any 64-bit value.
    pub fn add_int(
        &mut self,
        name: impl Into<FlagName>,
        flag_use: FlagUse,
        doc: &str,
    ) -> Result<IntFlag, FlagSpecificationError> {
        self.add_int_in(name, flag_use, doc, i64::MIN, i64::MAX)
    }

    /// Registers an integer flag restricted to `minimum..=maximum`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRange`](FlagSpecificationError::InvalidRange) when
    /// `minimum > maximum`, plus any name error.
    pub fn add_int_in(
        &mut self,
        name: impl Into<FlagName>,
        flag_use: FlagUse,
        doc: &str,
        minimum: i64,
        maximum: i64,
    ) -> Result<IntFlag, FlagSpecificationError> {
        let kind = FlagKind::Int {
            min: minimum,
            max: maximum,
        };
        self.register(name.into(), kind, flag_use, doc)
    }

    /// Registers a boolean flag.
    pub fn add_bool(
        &mut self,
        name: impl Into<FlagName>,
        flag_use: FlagUse,
        doc: &str,
    ) -> Result<BoolFlag, FlagSpecificationError> {
        self.register(name.into(), FlagKind::Bool, flag_use, doc)
    }

    fn register<T: FlagValueType>(
        &mut self,
        name: FlagName,
        kind: FlagKind,
        flag_use: FlagUse,
        doc: &str,
    ) -> Result<Flag<T>, FlagSpecificationError> {
        let primary = name
            .primary()
            .ok_or(FlagSpecificationError::EmptyName)?
            .to_string();
        check_kind(&primary, &kind)?;

        let id = FlagId(self.specs.len());
        self.names.register(name.aliases(), id)?;

        debug!(flag = %primary, kind = kind.type_name(), ?flag_use, "Registered flag");
        self.specs.push(FlagSpec::new(name.aliases().to_vec(), kind, flag_use, doc));
        self.states.push(FlagState::default());

        Ok(Flag {
            set: self.id,
            id,
            _marker: PhantomData,
        })
    }

    /// Registered flag specs in registration order.
    pub fn specs(&self) -> impl Iterator<Item = &FlagSpec> {
        self.specs.iter()
    }

    /// Finds a flag by alias.
    ///
    /// Accepts command-line form (`--protocol`, `-p`) or a bare name; a bare
    /// single character is tried as a long name first, then as a short one.
    pub fn lookup(&self, name: &str) -> Option<&FlagSpec> {
        let id = if let Some(long) = name.strip_prefix("--") {
            self.names.long(long)
        } else if let Some(short) = name.strip_prefix('-') {
            single_char(short).and_then(|c| self.names.short(c))
        } else {
            self.names
                .long(name)
                .or_else(|| single_char(name).and_then(|c| self.names.short(c)))
        };
        id.map(|id| self.spec(id))
    }

    /// Returns `true` once a parse has completed successfully.
    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    pub(crate) fn names(&self) -> &NameTable {
        &self.names
    }

    pub(crate) fn spec(&self, id: FlagId) -> &FlagSpec {
        &self.specs[id.0]
    }

    pub(crate) fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether `--help` and `-h` act as help requests.
    ///
    /// Requires `auto_help` and that neither alias is registered by a flag;
    /// claiming either one turns both into ordinary tokens.
    pub(crate) fn help_enabled(&self) -> bool {
        self.config.auto_help
            && self.names.long("help").is_none()
            && self.names.short('h').is_none()
    }

    /// Replaces every flag's state with the outcome of a completed session.
    pub(crate) fn commit(&mut self, bindings: Vec<Option<FlagValue>>) {
        debug_assert_eq!(bindings.len(), self.states.len());
        self.states = bindings
            .into_iter()
            .map(|value| FlagState { value })
            .collect();
        self.parsed = true;
    }

    fn state<T>(&self, handle: &Flag<T>) -> Result<(&FlagSpec, &FlagState), AccessError> {
        if handle.set != self.id || handle.id.0 >= self.states.len() {
            return Err(AccessError::ForeignHandle);
        }
        if !self.parsed {
            return Err(AccessError::CommandLineNotParsed);
        }
        Ok((&self.specs[handle.id.0], &self.states[handle.id.0]))
    }
}

fn check_kind(primary: &str, kind: &FlagKind) -> Result<(), FlagSpecificationError> {
    match kind {
        FlagKind::Enum { allowed } if allowed.is_empty() => {
            Err(FlagSpecificationError::EmptyEnumValues(primary.to_string()))
        }
        FlagKind::Int { min, max } if min > max => Err(FlagSpecificationError::InvalidRange {
            flag: primary.to_string(),
            min: *min,
            max: *max,
        }),
        _ => Ok(()),
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for String {}
    impl Sealed for i64 {}
    impl Sealed for bool {}
}

/// Rust types a flag handle can yield.
pub trait FlagValueType: sealed::Sealed + Sized {
    fn from_value(value: &FlagValue) -> Option<Self>;
}

impl FlagValueType for String {
    fn from_value(value: &FlagValue) -> Option<Self> {
        match value {
            FlagValue::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FlagValueType for i64 {
    fn from_value(value: &FlagValue) -> Option<Self> {
        match value {
            FlagValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FlagValueType for bool {
    fn from_value(value: &FlagValue) -> Option<Self> {
        match value {
            FlagValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Typed handle to a registered flag.
pub struct Flag<T> {
    set: u64,
    id: FlagId,
    _marker: PhantomData<fn() -> T>,
}

/// Handle returned by [`FlagSet::add_string`].
pub type StringFlag = Flag<String>;
/// Handle returned by [`FlagSet::add_enum`].
pub type EnumFlag = Flag<String>;
/// Handle returned by [`FlagSet::add_int`] and [`FlagSet::add_int_in`].
pub type IntFlag = Flag<i64>;
/// Handle returned by [`FlagSet::add_bool`].
pub type BoolFlag = Flag<bool>;

impl<T: FlagValueType> Flag<T> {
    /// Returns the parsed value.
    ///
    /// # Errors
    ///
    /// [`CommandLineNotParsed`](AccessError::CommandLineNotParsed) before a
    /// successful parse, [`FlagNotPassed`](AccessError::FlagNotPassed) when
    /// the flag was absent, [`ForeignHandle`](AccessError::ForeignHandle) when
    /// `flags` did not issue this handle.
    pub fn get(&self, flags: &FlagSet) -> Result<T, AccessError> {
        let (spec, state) = flags.state(self)?;
        match &state.value {
            Some(value) => T::from_value(value).ok_or(AccessError::ForeignHandle),
            None => Err(AccessError::FlagNotPassed(spec.display_name())),
        }
    }

    /// Returns whether the flag was given a value.
    pub fn present(&self, flags: &FlagSet) -> Result<bool, AccessError> {
        flags.state(self).map(|(_, state)| state.present())
    }

    /// Returns the flag's specification.
    pub fn spec<'a>(&self, flags: &'a FlagSet) -> Option<&'a FlagSpec> {
        (self.set == flags.id).then(|| flags.specs.get(self.id.0)).flatten()
    }
}

impl<T> Clone for Flag<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Flag<T> {}

impl<T> fmt::Debug for Flag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("set", &self.set)
            .field("id", &self.id.0)
            .finish()
    }
}

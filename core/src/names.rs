//! Alias validation and lookup.
//!
//! The name table maps every registered alias to its owning flag and rejects
//! malformed or colliding names at registration time.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::FlagSpecificationError;
use crate::types::Alias;

static LONG_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static regex must compile"));

/// Index of a flag in its [`FlagSet`](crate::FlagSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct FlagId(pub(crate) usize);

#[derive(Debug, Clone, Default)]
pub(crate) struct NameTable {
    entries: HashMap<Alias, FlagId>,
}

impl NameTable {
    /// Registers all aliases of one flag, or none of them.
    pub(crate) fn register(
        &mut self,
        aliases: &[Alias],
        owner: FlagId,
    ) -> Result<(), FlagSpecificationError> {
        if aliases.is_empty() {
            return Err(FlagSpecificationError::EmptyName);
        }

        let mut seen: HashSet<&Alias> = HashSet::new();
        for alias in aliases {
            validate_alias(alias)?;
            let repeated = !seen.insert(alias)
                || alias.counterpart().is_some_and(|other| seen.contains(&other));
            if repeated || self.is_taken(alias) {
                return Err(FlagSpecificationError::DuplicateAlias(alias.to_string()));
            }
        }

        for alias in aliases {
            self.entries.insert(alias.clone(), owner);
        }
        Ok(())
    }

    pub(crate) fn short(&self, c: char) -> Option<FlagId> {
        self.entries.get(&Alias::Short(c)).copied()
    }

    pub(crate) fn long(&self, name: &str) -> Option<FlagId> {
        self.entries.get(&Alias::Long(name.to_string())).copied()
    }

    fn is_taken(&self, alias: &Alias) -> bool {
        self.entries.contains_key(alias)
            || alias
                .counterpart()
                .is_some_and(|other| self.entries.contains_key(&other))
    }
}

/// Checks the character rules for a single alias.
pub(crate) fn validate_alias(alias: &Alias) -> Result<(), FlagSpecificationError> {
    match alias {
        Alias::Short(c) if c.is_ascii_alphanumeric() => Ok(()),
        Alias::Short(c) => Err(FlagSpecificationError::InvalidShortName(*c)),
        Alias::Long(name) if LONG_NAME_RE.is_match(name) => Ok(()),
        Alias::Long(name) => Err(FlagSpecificationError::InvalidLongName(name.clone())),
    }
}

//! Resolution of option tokens to registered flags.

use tracing::trace;

use crate::error::ParseError;
use crate::names::FlagId;
use crate::registry::FlagSet;

/// Where a matched flag's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawValue<'a> {
    /// Attached with `=`.
    Explicit(&'a str),
    /// Boolean given without a value.
    Implicit,
    /// Taken from the next argument.
    FromNext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Match<'a> {
    pub(crate) id: FlagId,
    pub(crate) value: RawValue<'a>,
}

fn raw_value<'a>(flags: &FlagSet, id: FlagId, value: Option<&'a str>) -> RawValue<'a> {
    match value {
        Some(v) => RawValue::Explicit(v),
        None if flags.spec(id).kind().is_bool() => RawValue::Implicit,
        None => RawValue::FromNext,
    }
}

/// Matches `--name[=value]`.
pub(crate) fn match_long<'a>(
    flags: &FlagSet,
    name: &str,
    value: Option<&'a str>,
) -> Result<Match<'a>, ParseError> {
    let id = flags
        .names()
        .long(name)
        .ok_or_else(|| ParseError::UnknownFlag {
            token: format!("--{name}"),
        })?;
    Ok(Match {
        id,
        value: raw_value(flags, id, value),
    })
}

/// Matches a short cluster such as `-v`, `-laHrt`, `-vt 500` or `-vt=500`.
///
/// Every character is a short alias. All but the last must be booleans; the
/// last one receives the attached value, or the next argument when it is not
/// a boolean. Unknown characters are reported before misplaced value flags.
pub(crate) fn match_short<'a>(
    flags: &FlagSet,
    cluster: &str,
    value: Option<&'a str>,
) -> Result<Vec<Match<'a>>, ParseError> {
    if cluster.is_empty() {
        // `-=value`
        return Err(ParseError::UnknownFlag {
            token: "-".to_string(),
        });
    }

    let ids = cluster
        .chars()
        .map(|c| {
            flags.names().short(c).ok_or_else(|| ParseError::UnknownFlag {
                token: format!("-{c}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let last = ids.len() - 1;
    let mut matches = Vec::with_capacity(ids.len());
    for (i, id) in ids.into_iter().enumerate() {
        if i < last {
            let spec = flags.spec(id);
            if !spec.kind().is_bool() {
                return Err(ParseError::AmbiguousShortFlag {
                    flag: spec.display_name(),
                    cluster: cluster.to_string(),
                });
            }
            matches.push(Match {
                id,
                value: RawValue::Implicit,
            });
        } else {
            matches.push(Match {
                id,
                value: raw_value(flags, id, value),
            });
        }
    }

    trace!(cluster, count = matches.len(), "Expanded short cluster");
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FlagUse;

    fn ls_flags() -> FlagSet {
        let mut flags = FlagSet::new();
        for c in ['l', 'a', 'H', 'r', 't'] {
            flags.add_bool(c, FlagUse::Optional, "").unwrap();
        }
        flags
            .add_int(('w', "width"), FlagUse::Optional, "")
            .unwrap();
        flags
    }

    #[test]
    fn test_long_match_value_sources() {
        let flags = ls_flags();
        let m = match_long(&flags, "width", Some("80")).unwrap();
        assert_eq!(m.value, RawValue::Explicit("80"));
        let m = match_long(&flags, "width", None).unwrap();
        assert_eq!(m.value, RawValue::FromNext);
    }

    #[test]
    fn test_long_unknown() {
        let flags = ls_flags();
        assert_eq!(
            match_long(&flags, "nope", None),
            Err(ParseError::UnknownFlag {
                token: "--nope".into()
            })
        );
        // Short aliases are not reachable with a double dash.
        assert!(match_long(&flags, "l", None).is_err());
    }

    #[test]
    fn test_squashed_booleans() {
        let flags = ls_flags();
        let matches = match_short(&flags, "laHrt", None).unwrap();
        assert_eq!(matches.len(), 5);
        assert!(matches.iter().all(|m| m.value == RawValue::Implicit));
    }

    #[test]
    fn test_unknown_char_in_cluster() {
        let flags = ls_flags();
        assert_eq!(
            match_short(&flags, "laHrtX", None),
            Err(ParseError::UnknownFlag { token: "-X".into() })
        );
        // Unknown wins over a misplaced value flag.
        assert_eq!(
            match_short(&flags, "wX", None),
            Err(ParseError::UnknownFlag { token: "-X".into() })
        );
    }

    #[test]
    fn test_value_flag_must_be_last() {
        let flags = ls_flags();
        assert_eq!(
            match_short(&flags, "lwa", None),
            Err(ParseError::AmbiguousShortFlag {
                flag: "-w".into(),
                cluster: "lwa".into()
            })
        );

        let matches = match_short(&flags, "law", None).unwrap();
        assert_eq!(matches[2].value, RawValue::FromNext);

        let matches = match_short(&flags, "law", Some("80")).unwrap();
        assert_eq!(matches[0].value, RawValue::Implicit);
        assert_eq!(matches[2].value, RawValue::Explicit("80"));
    }

    #[test]
    fn test_equals_on_trailing_boolean() {
        let flags = ls_flags();
        let matches = match_short(&flags, "lt", Some("false")).unwrap();
        assert_eq!(matches[1].value, RawValue::Explicit("false"));
    }

    #[test]
    fn test_empty_cluster_is_unknown() {
        let flags = ls_flags();
        assert!(matches!(
            match_short(&flags, "", Some("x")),
            Err(ParseError::UnknownFlag { .. })
        ));
    }
}

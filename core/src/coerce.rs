//! Conversion of raw argument strings into typed flag values.

use std::num::IntErrorKind;

use crate::error::ParseError;
use crate::types::{FlagKind, FlagSpec, FlagValue};

const TRUE_LITERALS: &[&str] = &["true", "yes", "on", "1"];
const FALSE_LITERALS: &[&str] = &["false", "no", "off", "0"];

/// Coerces `raw` to the flag's type and checks its constraints.
///
/// `raw` is `None` only for a boolean given without a value.
pub(crate) fn coerce(spec: &FlagSpec, raw: Option<&str>) -> Result<FlagValue, ParseError> {
    let Some(raw) = raw else {
        return Ok(FlagValue::Bool(true));
    };

    match spec.kind() {
        FlagKind::String => Ok(FlagValue::Str(raw.to_string())),
        FlagKind::Enum { allowed } => {
            if allowed.iter().any(|v| v == raw) {
                Ok(FlagValue::Str(raw.to_string()))
            } else {
                Err(invalid(
                    spec,
                    raw,
                    format!("expected one of: {}", allowed.join(", ")),
                ))
            }
        }
        FlagKind::Int { min, max } => {
            let out_of_range = || ParseError::OutOfRange {
                flag: spec.display_name(),
                value: raw.to_string(),
                min: *min,
                max: *max,
            };
            // `str::parse` would also accept a leading `+`.
            if raw.starts_with('+') {
                return Err(invalid(spec, raw, "expected a base-10 integer".to_string()));
            }
            let value = raw.parse::<i64>().map_err(|e| match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => out_of_range(),
                _ => invalid(spec, raw, "expected a base-10 integer".to_string()),
            })?;
            if value < *min || value > *max {
                return Err(out_of_range());
            }
            Ok(FlagValue::Int(value))
        }
        FlagKind::Bool => parse_bool(raw)
            .map(FlagValue::Bool)
            .ok_or_else(|| invalid(spec, raw, "expected a boolean".to_string())),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    let lower = raw.to_ascii_lowercase();
    if TRUE_LITERALS.contains(&lower.as_str()) {
        Some(true)
    } else if FALSE_LITERALS.contains(&lower.as_str()) {
        Some(false)
    } else {
        None
    }
}

fn invalid(spec: &FlagSpec, raw: &str, reason: String) -> ParseError {
    ParseError::InvalidValue {
        flag: spec.display_name(),
        value: raw.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Alias, FlagUse};

    fn spec(kind: FlagKind) -> FlagSpec {
        FlagSpec::new(vec![Alias::from("flag")], kind, FlagUse::Optional, "")
    }

    #[test]
    fn test_int_bounds_inclusive() {
        let timeout = spec(FlagKind::Int { min: 0, max: 60000 });
        assert_eq!(coerce(&timeout, Some("0")), Ok(FlagValue::Int(0)));
        assert_eq!(coerce(&timeout, Some("60000")), Ok(FlagValue::Int(60000)));
        assert!(matches!(
            coerce(&timeout, Some("-1")),
            Err(ParseError::OutOfRange { min: 0, max: 60000, .. })
        ));
        assert!(matches!(
            coerce(&timeout, Some("60001")),
            Err(ParseError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_int_syntax() {
        let n = spec(FlagKind::Int {
            min: i64::MIN,
            max: i64::MAX,
        });
        assert_eq!(coerce(&n, Some("-42")), Ok(FlagValue::Int(-42)));
        for bad in ["", "12abc", "1.5", " 3", "0x10", "+7", "+"] {
            assert!(
                matches!(coerce(&n, Some(bad)), Err(ParseError::InvalidValue { .. })),
                "{bad:?} should be rejected"
            );
        }
        assert!(matches!(
            coerce(&n, Some("99999999999999999999")),
            Err(ParseError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_enum_is_case_sensitive() {
        let protocol = spec(FlagKind::Enum {
            allowed: vec!["http".into(), "ftp".into(), "https".into()],
        });
        assert_eq!(
            coerce(&protocol, Some("https")),
            Ok(FlagValue::Str("https".into()))
        );
        assert_eq!(
            coerce(&protocol, Some("HTTPS")),
            Err(ParseError::InvalidValue {
                flag: "--flag".into(),
                value: "HTTPS".into(),
                reason: "expected one of: http, ftp, https".into(),
            })
        );
    }

    #[test]
    fn test_bool_literals() {
        let verbose = spec(FlagKind::Bool);
        assert_eq!(coerce(&verbose, None), Ok(FlagValue::Bool(true)));
        assert_eq!(coerce(&verbose, Some("FALSE")), Ok(FlagValue::Bool(false)));
        assert_eq!(coerce(&verbose, Some("Yes")), Ok(FlagValue::Bool(true)));
        assert_eq!(coerce(&verbose, Some("0")), Ok(FlagValue::Bool(false)));
        assert!(matches!(
            coerce(&verbose, Some("maybe")),
            Err(ParseError::InvalidValue { .. })
        ));
        assert!(coerce(&verbose, Some("")).is_err());
    }

    #[test]
    fn test_string_verbatim() {
        let name = spec(FlagKind::String);
        assert_eq!(
            coerce(&name, Some(" a value with spaces ")),
            Ok(FlagValue::Str(" a value with spaces ".into()))
        );
        assert_eq!(coerce(&name, Some("")), Ok(FlagValue::Str(String::new())));
    }
}

//! Signal cell values.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Cell tokens that mean "no value" in spreadsheet exports.
const MISSING_TOKENS: &[&str] = &["nan", "null", "n/a"];

/// One signal value: a score, an integer count/flag, a categorical string,
/// or nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum SignalValue {
    #[default]
    Missing,
    Integer(i64),
    Score(f64),
    Text(String),
}

impl SignalValue {
    /// Parse a raw cell. Never fails: anything non-numeric becomes `Text`,
    /// blanks and NaN-like tokens become `Missing`.
    pub fn parse(raw: &str) -> Self {
        let cell = raw.trim();
        if cell.is_empty() || MISSING_TOKENS.iter().any(|t| cell.eq_ignore_ascii_case(t)) {
            return Self::Missing;
        }
        if cell.eq_ignore_ascii_case("true") {
            return Self::Integer(1);
        }
        if cell.eq_ignore_ascii_case("false") {
            return Self::Integer(0);
        }
        if let Ok(i) = cell.parse::<i64>() {
            return Self::Integer(i);
        }
        match cell.parse::<f64>() {
            Ok(f) if f.is_finite() => Self::Score(f),
            Ok(_) => Self::Missing,
            Err(_) => Self::Text(cell.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Score(_))
    }

    /// Numeric view. `None` for text and missing values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Score(f) => Some(*f),
            Self::Text(_) | Self::Missing => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Lower-cased textual view used for categorical membership checks.
    pub fn as_category(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Missing => None,
            Self::Text(s) if s.bytes().any(|b| b.is_ascii_uppercase()) => {
                Some(Cow::Owned(s.to_ascii_lowercase()))
            }
            Self::Text(s) => Some(Cow::Borrowed(s)),
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

impl fmt::Display for SignalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Score(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for SignalValue {
    fn from(v: f64) -> Self {
        if v.is_finite() {
            Self::Score(v)
        } else {
            Self::Missing
        }
    }
}

impl From<i64> for SignalValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<&str> for SignalValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_kind() {
        assert_eq!(SignalValue::parse("0"), SignalValue::Integer(0));
        assert_eq!(SignalValue::parse(" 0.25 "), SignalValue::Score(0.25));
        assert_eq!(SignalValue::parse("1e-7"), SignalValue::Score(1e-7));
        assert_eq!(SignalValue::parse("pass"), SignalValue::Text("pass".into()));
        assert_eq!(SignalValue::parse("True"), SignalValue::Integer(1));
    }

    #[test]
    fn blanks_and_nan_are_missing() {
        for raw in ["", "   ", "NaN", "nan", "NULL", "n/a", "inf"] {
            assert!(SignalValue::parse(raw).is_missing(), "{raw:?} should be missing");
        }
    }

    #[test]
    fn none_is_a_category_not_missing() {
        let v = SignalValue::parse("none");
        assert_eq!(v.as_category().as_deref(), Some("none"));
    }

    #[test]
    fn category_view_lowercases() {
        let v = SignalValue::parse("SoftFail");
        assert_eq!(v.as_category().as_deref(), Some("softfail"));
        assert_eq!(SignalValue::Integer(3).as_category().as_deref(), Some("3"));
    }
}

//! `D<n>` email labels and batch selections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_SELECTION_SPAN;
use crate::errors::IngestError;

/// Label of one analyzed email, `D1..D100` in the source sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailId(u32);

impl EmailId {
    /// Create an id from its number. `D0` does not exist.
    pub fn new(number: u32) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    pub fn number(self) -> u32 {
        self.0
    }

    /// Zero-based row position this id occupies in an unsorted sheet.
    pub fn position(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Parse `D<n>`, tolerating surrounding whitespace and a lower-case `d`.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix('D')
            .or_else(|| trimmed.strip_prefix('d'))?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse::<u32>().ok().and_then(Self::new)
    }

    /// Parse a selection such as `D61-D65` or `D1,D7,D9` (mixing allowed:
    /// `D1,D5-D7`). Order is preserved, duplicates are dropped. A selection
    /// expanding to more than `MAX_SELECTION_SPAN` ids is rejected.
    pub fn parse_selection(input: &str) -> Result<Vec<Self>, IngestError> {
        let invalid = |message: String| IngestError::InvalidSelection {
            input: input.to_string(),
            message,
        };

        let mut ids = Vec::new();
        for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            if let Some((start, end)) = part.split_once('-') {
                let start = Self::parse(start)
                    .ok_or_else(|| invalid(format!("bad range start in '{part}'")))?;
                let end =
                    Self::parse(end).ok_or_else(|| invalid(format!("bad range end in '{part}'")))?;
                if end < start {
                    return Err(invalid(format!("range '{part}' is reversed")));
                }
                let span = (end.0 - start.0) as usize + 1;
                if ids.len() + span > MAX_SELECTION_SPAN {
                    return Err(invalid(format!(
                        "selection expands to more than {MAX_SELECTION_SPAN} ids"
                    )));
                }
                for n in start.0..=end.0 {
                    ids.push(Self(n));
                }
            } else {
                ids.push(Self::parse(part).ok_or_else(|| invalid(format!("bad id '{part}'")))?);
            }
        }

        if ids.is_empty() {
            return Err(invalid("no ids given".to_string()));
        }

        let mut seen = rustc_hash::FxHashSet::default();
        ids.retain(|id| seen.insert(*id));
        Ok(ids)
    }
}

impl fmt::Display for EmailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

impl FromStr for EmailId {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| IngestError::InvalidSelection {
            input: s.to_string(),
            message: "expected D<n>".to_string(),
        })
    }
}

impl TryFrom<String> for EmailId {
    type Error = IngestError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EmailId> for String {
    fn from(id: EmailId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_padded_labels() {
        assert_eq!(EmailId::parse("D32").map(EmailId::number), Some(32));
        assert_eq!(EmailId::parse("  d7 ").map(EmailId::number), Some(7));
        assert!(EmailId::parse("D").is_none());
        assert!(EmailId::parse("D0").is_none());
        assert!(EmailId::parse("X12").is_none());
        assert!(EmailId::parse("D1a").is_none());
    }

    #[test]
    fn position_is_zero_based() {
        assert_eq!(EmailId::parse("D61").unwrap().position(), 60);
    }

    #[test]
    fn selection_expands_ranges() {
        let ids = EmailId::parse_selection("D61-D65").unwrap();
        let labels: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["D61", "D62", "D63", "D64", "D65"]);
    }

    #[test]
    fn selection_mixes_lists_and_ranges_without_duplicates() {
        let ids = EmailId::parse_selection("D1, D5-D7, D6").unwrap();
        let numbers: Vec<u32> = ids.iter().map(|id| id.number()).collect();
        assert_eq!(numbers, vec![1, 5, 6, 7]);
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert!(EmailId::parse_selection("D9-D3").is_err());
        assert!(EmailId::parse_selection(" , ").is_err());
    }

    #[test]
    fn oversized_range_is_rejected() {
        let err = EmailId::parse_selection("D1-D4294967295").unwrap_err();
        assert!(matches!(err, IngestError::InvalidSelection { .. }));
        assert!(EmailId::parse_selection("D1-D100000").is_ok());
        assert!(EmailId::parse_selection("D1-D60000,D70000-D130000").is_err());
    }
}

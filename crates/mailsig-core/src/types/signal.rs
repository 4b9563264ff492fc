//! Signal definitions and their "active" predicates.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::value::SignalValue;

/// Value type of a signal column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Floating-point score, usually in `[0, 1]`.
    Score,
    /// Integer count or 0/1 flag.
    Flag,
    /// Categorical string such as an authentication result.
    Categorical,
}

/// When a signal counts as "active" (indicating presence of risk).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivePredicate {
    /// Present, numeric, and not zero.
    NonZero,
    /// Present at all.
    NonNull,
    /// Categorical value is one of the listed (lower-case) states.
    PositiveSet(BTreeSet<String>),
}

impl ActivePredicate {
    pub fn positive_set<I, S>(states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::PositiveSet(
            states
                .into_iter()
                .map(|s| s.as_ref().trim().to_ascii_lowercase())
                .collect(),
        )
    }

    /// Evaluate against a value. Missing or mismatched values are inactive.
    pub fn is_active(&self, value: &SignalValue) -> bool {
        match self {
            Self::NonZero => value.as_f64().is_some_and(|v| v != 0.0),
            Self::NonNull => !value.is_missing(),
            Self::PositiveSet(states) => value
                .as_category()
                .is_some_and(|c| states.contains(c.as_ref())),
        }
    }
}

/// A named signal with its value type and active predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalDefinition {
    pub name: String,
    pub kind: SignalKind,
    pub predicate: ActivePredicate,
}

impl SignalDefinition {
    pub fn categorical<I, S>(name: impl Into<String>, positive: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            kind: SignalKind::Categorical,
            predicate: ActivePredicate::positive_set(positive),
        }
    }

    /// Definition for a signal nobody configured: numeric values are active
    /// when non-zero, text values never are.
    pub fn inferred(name: impl Into<String>, sample: &SignalValue) -> Self {
        let kind = match sample {
            SignalValue::Integer(_) => SignalKind::Flag,
            SignalValue::Text(_) => SignalKind::Categorical,
            SignalValue::Score(_) | SignalValue::Missing => SignalKind::Score,
        };
        Self {
            name: name.into(),
            kind,
            predicate: ActivePredicate::NonZero,
        }
    }

    pub fn is_active(&self, value: &SignalValue) -> bool {
        self.predicate.is_active(value)
    }
}

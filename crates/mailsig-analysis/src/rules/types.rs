//! Rule and predicate types.

use std::collections::BTreeSet;
use std::fmt;

use mailsig_core::types::{Row, SignalValue};
use serde::{Deserialize, Serialize};

/// Comparison operator of a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    #[serde(alias = ">")]
    Gt,
    #[serde(alias = ">=")]
    Ge,
    #[serde(alias = "<")]
    Lt,
    #[serde(alias = "<=")]
    Le,
    #[serde(alias = "==")]
    Eq,
    #[serde(alias = "!=")]
    Ne,
    In,
    NotIn,
}

impl Operator {
    /// `In` and `NotIn` take a set of states; the rest take a number.
    pub fn is_membership(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::In => "in",
            Self::NotIn => "not in",
        }
    }

    fn compare(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Gt => lhs > rhs,
            Self::Ge => lhs >= rhs,
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
            Self::In | Self::NotIn => false,
        }
    }
}

/// What a predicate checks. The boundary is fixed by the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// Numeric comparison; the operator is never `In`/`NotIn`.
    Numeric { op: Operator, value: f64 },
    /// Lower-cased categorical value is one of the states.
    OneOf(BTreeSet<String>),
    /// Lower-cased categorical value is none of the states.
    NoneOf(BTreeSet<String>),
}

impl Check {
    pub fn operator(&self) -> Operator {
        match self {
            Self::Numeric { op, .. } => *op,
            Self::OneOf(_) => Operator::In,
            Self::NoneOf(_) => Operator::NotIn,
        }
    }
}

/// Result of one predicate against one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateOutcome {
    Pass,
    Fail,
    /// Signal absent from the row or empty.
    Missing,
    /// Signal present but of the wrong kind for the check.
    Unparseable,
}

impl PredicateOutcome {
    pub fn passed(self) -> bool {
        self == Self::Pass
    }
}

/// One per-signal condition of a rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub signal: String,
    pub check: Check,
}

impl Predicate {
    pub fn numeric(signal: impl Into<String>, op: Operator, value: f64) -> Self {
        debug_assert!(!op.is_membership());
        Self {
            signal: signal.into(),
            check: Check::Numeric { op, value },
        }
    }

    pub fn gt(signal: impl Into<String>, value: f64) -> Self {
        Self::numeric(signal, Operator::Gt, value)
    }

    pub fn ge(signal: impl Into<String>, value: f64) -> Self {
        Self::numeric(signal, Operator::Ge, value)
    }

    pub fn lt(signal: impl Into<String>, value: f64) -> Self {
        Self::numeric(signal, Operator::Lt, value)
    }

    pub fn le(signal: impl Into<String>, value: f64) -> Self {
        Self::numeric(signal, Operator::Le, value)
    }

    pub fn equals(signal: impl Into<String>, value: f64) -> Self {
        Self::numeric(signal, Operator::Eq, value)
    }

    pub fn not_equals(signal: impl Into<String>, value: f64) -> Self {
        Self::numeric(signal, Operator::Ne, value)
    }

    pub fn one_of<I, S>(signal: impl Into<String>, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            signal: signal.into(),
            check: Check::OneOf(lower_set(states)),
        }
    }

    pub fn none_of<I, S>(signal: impl Into<String>, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            signal: signal.into(),
            check: Check::NoneOf(lower_set(states)),
        }
    }

    /// Evaluate against a row. Never fails.
    pub fn evaluate(&self, row: &Row) -> PredicateOutcome {
        match row.get(&self.signal) {
            None | Some(SignalValue::Missing) => PredicateOutcome::Missing,
            Some(value) => self.evaluate_value(value),
        }
    }

    pub fn evaluate_value(&self, value: &SignalValue) -> PredicateOutcome {
        let verdict = match &self.check {
            Check::Numeric { op, value: rhs } => match value.as_f64() {
                Some(lhs) => op.compare(lhs, *rhs),
                None if value.is_missing() => return PredicateOutcome::Missing,
                None => return PredicateOutcome::Unparseable,
            },
            Check::OneOf(states) | Check::NoneOf(states) => {
                let Some(category) = value.as_category() else {
                    return PredicateOutcome::Missing;
                };
                let member = states.contains(category.as_ref());
                matches!(self.check, Check::OneOf(_)) == member
            }
        };
        if verdict {
            PredicateOutcome::Pass
        } else {
            PredicateOutcome::Fail
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.check {
            Check::Numeric { op, value } => write!(f, "{} {} {}", self.signal, op.symbol(), value),
            Check::OneOf(states) | Check::NoneOf(states) => {
                let states: Vec<&str> = states.iter().map(String::as_str).collect();
                write!(
                    f,
                    "{} {} {{{}}}",
                    self.signal,
                    self.check.operator().symbol(),
                    states.join(", ")
                )
            }
        }
    }
}

fn lower_set<I, S>(states: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    states
        .into_iter()
        .map(|s| s.as_ref().trim().to_ascii_lowercase())
        .collect()
}

/// A named conjunction of predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRule {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub predicates: Vec<Predicate>,
}

impl ClassificationRule {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            predicates: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Signals this rule reads.
    pub fn signals(&self) -> impl Iterator<Item = &str> {
        self.predicates.iter().map(|p| p.signal.as_str())
    }
}

//! Classification rule errors.

use super::error_code::{self, MailsigErrorCode};

/// Errors that can occur while loading or compiling classification rules.
///
/// Evaluating a rule against a row never produces one of these: lookup
/// failures there degrade to a non-matching verdict.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Rule parse error: {0}")]
    ParseError(String),

    #[error("Invalid predicate in rule '{rule}' on signal '{signal}': {message}")]
    InvalidPredicate {
        rule: String,
        signal: String,
        message: String,
    },

    #[error("Rule '{0}' has no predicates")]
    EmptyRule(String),

    #[error("Duplicate rule id: {0}")]
    DuplicateRule(String),

    #[error("Unknown rule: {0}")]
    UnknownRule(String),
}

impl MailsigErrorCode for RuleError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownRule(_) => error_code::UNKNOWN_RULE,
            _ => error_code::RULE_ERROR,
        }
    }
}

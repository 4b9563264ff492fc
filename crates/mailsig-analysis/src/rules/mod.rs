//! Classification rules: predicate conjunctions over a row's signals.

pub mod builtin;
pub mod evaluate;
pub mod rule_set;
pub mod toml_rules;
pub mod types;

pub use evaluate::{classify, evaluate, matching_indices, matching_rows, RuleVerdict};
pub use rule_set::RuleSet;
pub use toml_rules::TomlRuleLoader;
pub use types::{Check, ClassificationRule, Operator, Predicate, PredicateOutcome};

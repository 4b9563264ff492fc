//! Declarative TOML rule definitions, loadable without recompiling.
//!
//! ```toml
//! [[rules]]
//! id = "trusted-newsletter"
//! name = "Trusted newsletter"
//!
//! [[rules.predicates]]
//! signal = "sender_domain_reputation_score"
//! op = "gt"
//! value = 0.8
//!
//! [[rules.predicates]]
//! signal = "request_type"
//! op = "not_in"
//! values = ["payment_request"]
//! ```

use std::path::Path;

use mailsig_core::errors::RuleError;
use serde::{Deserialize, Serialize};

use super::rule_set::RuleSet;
use super::types::{ClassificationRule, Operator, Predicate};

/// A TOML-defined rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlRuleDef {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub predicates: Vec<TomlPredicateDef>,
}

/// A TOML-defined predicate. `value` is read by numeric operators,
/// `values` by `in` / `not_in`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlPredicateDef {
    pub signal: String,
    pub op: Operator,
    pub value: Option<f64>,
    #[serde(default)]
    pub values: Vec<String>,
}

/// A collection of TOML rule definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlRuleFile {
    #[serde(default)]
    pub rules: Vec<TomlRuleDef>,
}

/// Loader for TOML rule definitions.
pub struct TomlRuleLoader;

impl TomlRuleLoader {
    /// Load rules from a TOML string.
    pub fn load_from_str(toml_str: &str) -> Result<RuleSet, RuleError> {
        let file: TomlRuleFile = toml::from_str(toml_str)
            .map_err(|e| RuleError::ParseError(format!("TOML parse error: {e}")))?;

        let mut rules = Vec::new();
        for def in file.rules {
            if def.enabled == Some(false) {
                continue;
            }
            rules.push(Self::compile(def)?);
        }
        RuleSet::new(rules)
    }

    /// Load rules from a file path.
    pub fn load_from_file(path: &Path) -> Result<RuleSet, RuleError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RuleError::ParseError(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::load_from_str(&content)
    }

    /// Compile a single rule definition.
    fn compile(def: TomlRuleDef) -> Result<ClassificationRule, RuleError> {
        if def.id.trim().is_empty() {
            return Err(RuleError::ParseError("rule with empty id".to_string()));
        }
        if def.predicates.is_empty() {
            return Err(RuleError::EmptyRule(def.id));
        }

        let predicates = def
            .predicates
            .into_iter()
            .map(|p| Self::compile_predicate(&def.id, p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ClassificationRule {
            name: def.name.unwrap_or_else(|| def.id.clone()),
            id: def.id,
            description: def.description,
            predicates,
        })
    }

    fn compile_predicate(rule: &str, def: TomlPredicateDef) -> Result<Predicate, RuleError> {
        let invalid = |message: &str| RuleError::InvalidPredicate {
            rule: rule.to_string(),
            signal: def.signal.clone(),
            message: message.to_string(),
        };

        if def.signal.trim().is_empty() {
            return Err(invalid("empty signal name"));
        }

        match def.op {
            Operator::In | Operator::NotIn => {
                if def.values.is_empty() {
                    return Err(invalid("'in'/'not_in' need a non-empty 'values' list"));
                }
                Ok(if def.op == Operator::In {
                    Predicate::one_of(def.signal.trim(), &def.values)
                } else {
                    Predicate::none_of(def.signal.trim(), &def.values)
                })
            }
            op => {
                let value = def
                    .value
                    .ok_or_else(|| invalid("numeric operator needs 'value'"))?;
                if !value.is_finite() {
                    return Err(invalid("'value' must be finite"));
                }
                Ok(Predicate::numeric(def.signal.trim(), op, value))
            }
        }
    }
}

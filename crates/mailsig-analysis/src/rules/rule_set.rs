//! Ordered, id-keyed rule collections.

use mailsig_core::config::RulesConfig;
use mailsig_core::errors::RuleError;

use super::builtin::builtin_rules;
use super::toml_rules::TomlRuleLoader;
use super::types::ClassificationRule;

/// Rules in declaration order with unique ids.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<ClassificationRule>,
}

impl RuleSet {
    /// Build a set, rejecting duplicate ids and empty rules.
    pub fn new(rules: Vec<ClassificationRule>) -> Result<Self, RuleError> {
        let mut set = Self::default();
        for rule in rules {
            if rule.predicates.is_empty() {
                return Err(RuleError::EmptyRule(rule.id));
            }
            if set.get(&rule.id).is_some() {
                return Err(RuleError::DuplicateRule(rule.id));
            }
            set.rules.push(rule);
        }
        Ok(set)
    }

    pub fn builtin() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Built-in rules, overlaid with the rules file, minus disabled ids.
    pub fn load(config: &RulesConfig) -> Result<Self, RuleError> {
        let mut set = Self::builtin();
        if let Some(path) = config.path.as_deref() {
            set.merge(TomlRuleLoader::load_from_file(path)?);
        }
        for id in &config.disabled {
            if set.remove(id).is_none() {
                tracing::warn!(rule_id = %id, "disabled rule does not exist");
            }
        }
        Ok(set)
    }

    /// Merge `other` into this set: a rule with a known id replaces the
    /// existing one in place, new ids are appended.
    pub fn merge(&mut self, other: RuleSet) {
        for rule in other.rules {
            match self.rules.iter_mut().find(|r| r.id == rule.id) {
                Some(existing) => *existing = rule,
                None => self.rules.push(rule),
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<ClassificationRule> {
        let idx = self.rules.iter().position(|r| r.id == id)?;
        Some(self.rules.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&ClassificationRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Like [`get`](Self::get), but an unknown id is an error.
    pub fn require(&self, id: &str) -> Result<&ClassificationRule, RuleError> {
        self.get(id)
            .ok_or_else(|| RuleError::UnknownRule(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassificationRule> {
        self.rules.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a ClassificationRule;
    type IntoIter = std::slice::Iter<'a, ClassificationRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

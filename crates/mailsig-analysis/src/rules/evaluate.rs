//! Rule evaluation over rows.

use mailsig_core::tracing::events;
use mailsig_core::types::Row;
use serde::Serialize;
use smallvec::SmallVec;

use super::types::{ClassificationRule, Predicate, PredicateOutcome};

/// `true` when every predicate of `rule` passes for `row`. Missing or
/// unparseable signals fail the rule; this never fails or panics.
pub fn classify(row: &Row, rule: &ClassificationRule) -> bool {
    rule.predicates.iter().all(|p| p.evaluate(row).passed())
}

/// Per-predicate outcomes of one rule against one row.
#[derive(Debug, Clone, Serialize)]
pub struct RuleVerdict {
    pub rule_id: String,
    pub row: String,
    pub matched: bool,
    pub outcomes: SmallVec<[PredicateOutcome; 16]>,
}

impl RuleVerdict {
    /// Predicates that did not pass, paired with their outcome.
    pub fn failures<'r>(
        &'r self,
        rule: &'r ClassificationRule,
    ) -> impl Iterator<Item = (&'r Predicate, PredicateOutcome)> + 'r {
        rule.predicates
            .iter()
            .zip(self.outcomes.iter().copied())
            .filter(|(_, outcome)| !outcome.passed())
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed()).count()
    }

    /// First predicate that could not be evaluated at all.
    pub fn first_unevaluable<'r>(&self, rule: &'r ClassificationRule) -> Option<&'r Predicate> {
        rule.predicates
            .iter()
            .zip(&self.outcomes)
            .find(|(_, o)| matches!(o, PredicateOutcome::Missing | PredicateOutcome::Unparseable))
            .map(|(p, _)| p)
    }
}

/// Evaluate every predicate of `rule` against `row`, without short-circuit.
pub fn evaluate(row: &Row, rule: &ClassificationRule) -> RuleVerdict {
    let outcomes: SmallVec<[PredicateOutcome; 16]> =
        rule.predicates.iter().map(|p| p.evaluate(row)).collect();
    RuleVerdict {
        rule_id: rule.id.clone(),
        row: row.label().to_string(),
        matched: outcomes.iter().all(|o| o.passed()),
        outcomes,
    }
}

/// Rows of `rows` that match `rule`, in order.
pub fn matching_rows<'a>(rows: &'a [Row], rule: &ClassificationRule) -> Vec<&'a Row> {
    matching_indices(rows, rule)
        .into_iter()
        .map(|idx| &rows[idx])
        .collect()
}

/// Indices into `rows` of the rows that match `rule`, ascending.
pub fn matching_indices(rows: &[Row], rule: &ClassificationRule) -> Vec<usize> {
    let mut matched = Vec::new();
    for (idx, row) in rows.iter().enumerate() {
        let verdict = evaluate(row, rule);
        if verdict.matched {
            matched.push(idx);
        } else if let Some(predicate) = verdict.first_unevaluable(rule) {
            events::row_skipped(row.label(), &rule.id, &predicate.signal);
        }
    }
    events::rule_evaluated(&rule.id, rows.len(), matched.len());
    matched
}

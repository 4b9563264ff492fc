//! Active signal extraction.

use std::collections::BTreeSet;

use mailsig_core::types::{Row, SignalValue};
use serde::Serialize;

use super::category::SignalCategory;
use super::registry::SignalRegistry;

/// One active signal of a row, owned so analyses outlive the batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveSignal {
    pub name: String,
    pub value: SignalValue,
    pub category: SignalCategory,
}

/// Names of the active signals of `row`. Missing and unparseable values
/// are inactive; this never fails.
pub fn active_signals(row: &Row, registry: &SignalRegistry) -> BTreeSet<String> {
    row.signals()
        .filter(|(name, value)| registry.is_active(name, value))
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Active signals of `row` with their values, in column order.
pub fn active_values<'r>(
    row: &'r Row,
    registry: &SignalRegistry,
) -> Vec<(&'r str, &'r SignalValue)> {
    row.signals()
        .filter(|(name, value)| registry.is_active(name, value))
        .collect()
}

/// Active signals of `row` with their categories.
pub fn categorized(row: &Row, registry: &SignalRegistry) -> Vec<ActiveSignal> {
    active_values(row, registry)
        .into_iter()
        .map(|(name, value)| ActiveSignal {
            name: name.to_string(),
            value: value.clone(),
            category: SignalCategory::of(name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_categorical_activity() {
        let row = Row::from_pairs(
            "D1",
            [
                ("content_spam_score", SignalValue::from(0.3)),
                ("malicious_attachment_Count", SignalValue::from(0_i64)),
                ("spf_result", SignalValue::from("SoftFail")),
                ("dkim_result", SignalValue::from("pass")),
                ("request_type", SignalValue::from("none")),
                ("url_count", SignalValue::Missing),
            ],
        );
        let active = active_signals(&row, &SignalRegistry::default());
        let names: Vec<&str> = active.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["content_spam_score", "spf_result"]);
    }

    #[test]
    fn values_keep_column_order() {
        let row = Row::from_pairs("D2", [("z_score", 1_i64), ("a_score", 2_i64)]);
        let values = active_values(&row, &SignalRegistry::empty());
        let names: Vec<&str> = values.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["z_score", "a_score"]);
    }
}

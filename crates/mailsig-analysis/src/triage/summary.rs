//! Pattern summary over a group of rows.

use std::collections::{BTreeMap, BTreeSet};

use mailsig_core::types::{Row, SignalValue};
use serde::Serialize;

/// Averages of numeric signals and distinct values of categorical ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatternSummary {
    pub row_count: usize,
    /// Signal -> mean over the rows where it is numeric.
    pub averages: BTreeMap<String, f64>,
    /// Signal -> distinct lower-cased values where it is text.
    pub distinct: BTreeMap<String, BTreeSet<String>>,
}

impl PatternSummary {
    /// Summarize `signals` over `rows`. A signal with any text value is
    /// treated as categorical; otherwise it is averaged.
    pub fn over<'a, I>(rows: I, signals: &[String]) -> Self
    where
        I: IntoIterator<Item = &'a Row>,
        I::IntoIter: Clone,
    {
        let rows = rows.into_iter();
        let mut summary = Self {
            row_count: rows.clone().count(),
            ..Self::default()
        };

        for signal in signals {
            let values: Vec<&SignalValue> = rows
                .clone()
                .filter_map(|row| row.get(signal))
                .filter(|v| !v.is_missing())
                .collect();
            if values.is_empty() {
                continue;
            }
            if values.iter().any(|v| v.as_text().is_some()) {
                let distinct = values
                    .iter()
                    .filter_map(|v| v.as_category())
                    .map(|c| c.into_owned())
                    .collect();
                summary.distinct.insert(signal.clone(), distinct);
            } else {
                let sum: f64 = values.iter().filter_map(|v| v.as_f64()).sum();
                summary
                    .averages
                    .insert(signal.clone(), sum / values.len() as f64);
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_numbers_and_collects_categories() {
        let rows = vec![
            Row::from_pairs(
                "D1",
                [("rep", SignalValue::from(0.8)), ("req", SignalValue::from("None"))],
            ),
            Row::from_pairs(
                "D2",
                [("rep", SignalValue::from(0.6)), ("req", SignalValue::from("invoice"))],
            ),
        ];
        let signals = vec!["rep".to_string(), "req".to_string(), "absent".to_string()];
        let summary = PatternSummary::over(&rows, &signals);
        assert_eq!(summary.row_count, 2);
        assert!((summary.averages["rep"] - 0.7).abs() < 1e-9);
        let req: Vec<&str> = summary.distinct["req"].iter().map(String::as_str).collect();
        assert_eq!(req, vec!["invoice", "none"]);
        assert!(!summary.averages.contains_key("absent"));
    }
}

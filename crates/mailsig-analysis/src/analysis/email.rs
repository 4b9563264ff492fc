//! Analysis of a single email row.

use std::collections::BTreeMap;

use mailsig_core::types::Row;
use serde::Serialize;

use crate::signals::active::categorized;
use crate::signals::{
    ActiveSignal, HighRiskIndicator, Recommendation, RiskLevel, RiskModel, SignalCategory,
    SignalRegistry,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailAnalysis {
    pub label: String,
    pub active: Vec<ActiveSignal>,
    pub category_counts: BTreeMap<SignalCategory, usize>,
    pub high_risk: Vec<HighRiskIndicator>,
    pub risk_level: RiskLevel,
    pub recommendation: Recommendation,
    /// Sum of the active numeric values.
    pub numeric_total: f64,
    /// Highest active numeric signals, descending.
    pub top_numeric: Vec<(String, f64)>,
    /// Signals that did not fire, in column order.
    pub inactive: Vec<String>,
}

impl EmailAnalysis {
    pub fn analyze(row: &Row, registry: &SignalRegistry, risk: &RiskModel, top_numeric: usize) -> Self {
        let active = categorized(row, registry);

        let mut category_counts = BTreeMap::new();
        for signal in &active {
            *category_counts.entry(signal.category).or_insert(0) += 1;
        }

        let mut numeric: Vec<(String, f64)> = active
            .iter()
            .filter_map(|s| s.value.as_f64().map(|v| (s.name.clone(), v)))
            .collect();
        let numeric_total: f64 = numeric.iter().map(|(_, v)| v).sum();
        // Stable sort keeps column order among equal values.
        numeric.sort_by(|a, b| b.1.total_cmp(&a.1));
        numeric.truncate(top_numeric);

        let inactive = row
            .schema()
            .signal_names()
            .filter(|name| !active.iter().any(|s| s.name == *name))
            .map(str::to_string)
            .collect();

        Self {
            label: row.label().to_string(),
            high_risk: risk.high_risk(&active),
            risk_level: risk.level(active.len()),
            recommendation: risk.recommendation(active.len()),
            category_counts,
            numeric_total,
            top_numeric: numeric,
            inactive,
            active,
        }
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn category_count(&self, category: SignalCategory) -> usize {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }

    pub fn in_category(&self, category: SignalCategory) -> impl Iterator<Item = &ActiveSignal> {
        self.active.iter().filter(move |s| s.category == category)
    }

    /// Percentage of `signal_count` signals that are active.
    pub fn activity_percentage(&self, signal_count: usize) -> f64 {
        if signal_count == 0 {
            0.0
        } else {
            self.active.len() as f64 / signal_count as f64 * 100.0
        }
    }
}

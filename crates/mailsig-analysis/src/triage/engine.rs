//! Tiered No-Action triage over a batch.

use std::collections::BTreeMap;

use mailsig_core::config::TriageConfig;
use mailsig_core::errors::{Diagnostic, RuleError};
use mailsig_core::types::Row;
use mailsig_core::TriageResult;
use rustc_hash::FxHashSet;
use serde::Serialize;

use super::auth::{auth_results, AuthResults};
use super::summary::PatternSummary;
use crate::columns::{REQUEST_TYPE, SENDER_REPUTATION, SPAM_SCORE};
use crate::rules::{matching_indices, RuleSet};

/// Where a No-Action candidate stands against its current label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    AlreadyNoAction,
    ShouldBeNoAction,
    /// The label column is absent or not a number.
    Unlabelled,
}

impl CandidateStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::AlreadyNoAction => "Already No Action",
            Self::ShouldBeNoAction => "Should be No Action",
            Self::Unlabelled => "Unlabelled",
        }
    }
}

/// Key metrics of one row, as listed in the triage report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageEntry {
    pub label: String,
    pub current_label: Option<i64>,
    pub status: CandidateStatus,
    pub reputation: Option<f64>,
    pub spam: Option<f64>,
    pub request_type: Option<String>,
    pub auth: AuthResults,
}

/// Rows claimed by one tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierMatch {
    pub rule_id: String,
    pub rule_name: String,
    pub entries: Vec<TriageEntry>,
}

/// A row whose borderline signal sits inside the borderline range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BorderlineEntry {
    pub label: String,
    pub value: f64,
    pub spam: Option<f64>,
    pub request_type: Option<String>,
    pub current_label: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TriageOutcome {
    pub row_count: usize,
    pub label_column: String,
    pub no_action_label: i64,
    pub tiers: Vec<TierMatch>,
    /// Rows with at least `min_auth_passes` passing results.
    pub good_auth: Vec<TriageEntry>,
    /// Labels of rows already carrying the No Action label.
    pub current_no_action: Vec<String>,
    /// Candidates grouped by their current label value.
    pub by_current_label: BTreeMap<String, Vec<String>>,
    pub pattern: PatternSummary,
    pub borderline_signal: String,
    pub borderline: Vec<BorderlineEntry>,
}

impl TriageOutcome {
    /// Every candidate across all tiers, in tier order.
    pub fn candidates(&self) -> impl Iterator<Item = &TriageEntry> {
        self.tiers.iter().flat_map(|t| t.entries.iter())
    }

    pub fn candidate_count(&self) -> usize {
        self.tiers.iter().map(|t| t.entries.len()).sum()
    }

    pub fn should_be_no_action(&self) -> impl Iterator<Item = &TriageEntry> {
        self.candidates()
            .filter(|e| e.status == CandidateStatus::ShouldBeNoAction)
    }
}

/// Runs the configured tiers and the auxiliary listings over a batch.
pub struct TriageEngine<'a> {
    rules: &'a RuleSet,
    config: &'a TriageConfig,
}

impl<'a> TriageEngine<'a> {
    pub fn new(rules: &'a RuleSet, config: &'a TriageConfig) -> Self {
        Self { rules, config }
    }

    /// Run the triage. Fails only when a configured tier names an unknown rule.
    pub fn run(&self, rows: &[Row]) -> Result<TriageResult<TriageOutcome>, RuleError> {
        let label_column = self.config.effective_label_column().to_string();
        let no_action_label = self.config.effective_no_action_label();

        let mut result = TriageResult::new(TriageOutcome {
            row_count: rows.len(),
            label_column: label_column.clone(),
            no_action_label,
            borderline_signal: self.config.effective_borderline_signal().to_string(),
            ..TriageOutcome::default()
        });

        if rows
            .first()
            .is_some_and(|row| row.schema().index_of(&label_column).is_none())
        {
            result.add_diagnostic(Diagnostic::new(
                "triage",
                format!("label column '{label_column}' not present; candidates are unlabelled"),
            ));
        }

        let entry = |row: &Row| self.entry(row, &label_column, no_action_label);

        let mut claimed: FxHashSet<usize> = FxHashSet::default();
        for tier_id in self.config.effective_tiers() {
            let rule = self.rules.require(&tier_id)?;
            // Keyed by slice index: positions repeat across batches and standalone rows.
            let entries: Vec<TriageEntry> = matching_indices(rows, rule)
                .into_iter()
                .filter(|idx| claimed.insert(*idx))
                .map(|idx| entry(&rows[idx]))
                .collect();
            result.data.tiers.push(TierMatch {
                rule_id: rule.id.clone(),
                rule_name: rule.name.clone(),
                entries,
            });
        }

        let min_passes = self.config.effective_min_auth_passes();
        result.data.good_auth = rows
            .iter()
            .filter(|row| auth_results(row).score() >= min_passes)
            .map(entry)
            .collect();

        let current: Vec<&Row> = rows
            .iter()
            .filter(|row| current_label(row, &label_column) == Some(no_action_label))
            .collect();
        result.data.current_no_action = current.iter().map(|r| r.label().to_string()).collect();
        result.data.pattern =
            PatternSummary::over(current.iter().copied(), &self.config.effective_summary_signals());

        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for candidate in result.data.candidates() {
            let key = candidate
                .current_label
                .map(|l| l.to_string())
                .unwrap_or_else(|| "unlabelled".to_string());
            grouped.entry(key).or_default().push(candidate.label.clone());
        }
        result.data.by_current_label = grouped;

        let (min, max) = self.config.effective_borderline_range();
        let signal = self.config.effective_borderline_signal();
        result.data.borderline = rows
            .iter()
            .filter_map(|row| {
                let value = row.get(signal)?.as_f64()?;
                (min..=max).contains(&value).then(|| BorderlineEntry {
                    label: row.label().to_string(),
                    value,
                    spam: numeric(row, SPAM_SCORE),
                    request_type: text(row, REQUEST_TYPE),
                    current_label: current_label(row, &label_column),
                })
            })
            .collect();

        tracing::info!(
            rows = rows.len(),
            candidates = result.data.candidate_count(),
            borderline = result.data.borderline.len(),
            "triage complete"
        );
        Ok(result)
    }

    fn entry(&self, row: &Row, label_column: &str, no_action_label: i64) -> TriageEntry {
        let current = current_label(row, label_column);
        let status = match current {
            Some(l) if l == no_action_label => CandidateStatus::AlreadyNoAction,
            Some(_) => CandidateStatus::ShouldBeNoAction,
            None => CandidateStatus::Unlabelled,
        };
        TriageEntry {
            label: row.label().to_string(),
            current_label: current,
            status,
            reputation: numeric(row, SENDER_REPUTATION),
            spam: numeric(row, SPAM_SCORE),
            request_type: text(row, REQUEST_TYPE),
            auth: auth_results(row),
        }
    }
}

/// Integral value of the label column.
fn current_label(row: &Row, label_column: &str) -> Option<i64> {
    let value = row.get(label_column)?.as_f64()?;
    (value.fract() == 0.0).then_some(value as i64)
}

fn numeric(row: &Row, signal: &str) -> Option<f64> {
    row.get(signal).and_then(|v| v.as_f64())
}

fn text(row: &Row, signal: &str) -> Option<String> {
    row.get(signal)
        .filter(|v| !v.is_missing())
        .map(ToString::to_string)
}

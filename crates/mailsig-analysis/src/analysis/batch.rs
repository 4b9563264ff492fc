//! Aggregate analysis over a batch.

use std::collections::BTreeMap;

use mailsig_core::config::MailsigConfig;
use mailsig_core::constants;
use mailsig_core::types::Row;
use rustc_hash::FxHashMap;
use serde::Serialize;

use super::email::EmailAnalysis;
use crate::signals::{RiskLevel, RiskModel, SignalRegistry};

/// How many emails a signal is active in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalFrequency {
    pub signal: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchStats {
    pub email_count: usize,
    pub average_active: f64,
    pub min_active: usize,
    pub max_active: usize,
    /// (label, active count); the first email wins on ties.
    pub most_active: Option<(String, usize)>,
    pub least_active: Option<(String, usize)>,
    pub risk_distribution: BTreeMap<RiskLevel, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchAnalysis {
    pub source: String,
    /// Signal columns in the batch (the activity denominator).
    pub signal_count: usize,
    pub emails: Vec<EmailAnalysis>,
    pub stats: BatchStats,
    /// Most common active signals, by descending count then name.
    pub signal_frequency: Vec<SignalFrequency>,
}

impl BatchAnalysis {
    /// `first_last` label span such as `D61-D65`.
    pub fn span(&self) -> String {
        match (self.emails.first(), self.emails.last()) {
            (Some(first), Some(last)) if self.emails.len() > 1 => {
                format!("{}-{}", first.label, last.label)
            }
            (Some(only), _) => only.label.clone(),
            _ => "empty".to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

/// Analyzes rows with one registry and risk model.
#[derive(Debug, Clone)]
pub struct Analyzer {
    registry: SignalRegistry,
    risk: RiskModel,
    top_signals: usize,
    top_numeric: usize,
}

impl Analyzer {
    pub fn new(registry: SignalRegistry, risk: RiskModel) -> Self {
        Self {
            registry,
            risk,
            top_signals: constants::DEFAULT_TOP_SIGNALS,
            top_numeric: constants::DEFAULT_TOP_NUMERIC,
        }
    }

    pub fn from_config(config: &MailsigConfig) -> Self {
        Self {
            registry: SignalRegistry::from_config(&config.signals),
            risk: RiskModel::from_config(&config.signals),
            top_signals: config.report.effective_top_signals(),
            top_numeric: config.report.effective_top_numeric(),
        }
    }

    pub fn with_top_signals(mut self, n: usize) -> Self {
        self.top_signals = n;
        self
    }

    pub fn analyze_row(&self, row: &Row) -> EmailAnalysis {
        EmailAnalysis::analyze(row, &self.registry, &self.risk, self.top_numeric)
    }

    /// Analyze `rows`. The signal count comes from the rows' schema.
    pub fn analyze(&self, source: &str, rows: &[Row]) -> BatchAnalysis {
        let emails: Vec<EmailAnalysis> = rows.iter().map(|row| self.analyze_row(row)).collect();
        let signal_count = rows.first().map_or(0, |row| row.schema().signal_count());

        BatchAnalysis {
            source: source.to_string(),
            signal_count,
            stats: stats(&emails),
            signal_frequency: frequency(&emails, self.top_signals),
            emails,
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(SignalRegistry::default(), RiskModel::default())
    }
}

fn stats(emails: &[EmailAnalysis]) -> BatchStats {
    if emails.is_empty() {
        return BatchStats::default();
    }

    let mut most: Option<&EmailAnalysis> = None;
    let mut least: Option<&EmailAnalysis> = None;
    let mut distribution = BTreeMap::new();
    for email in emails {
        if most.map_or(true, |m| email.active_count() > m.active_count()) {
            most = Some(email);
        }
        if least.map_or(true, |l| email.active_count() < l.active_count()) {
            least = Some(email);
        }
        *distribution.entry(email.risk_level).or_insert(0) += 1;
    }

    let total: usize = emails.iter().map(EmailAnalysis::active_count).sum();
    let pick = |e: Option<&EmailAnalysis>| e.map(|e| (e.label.clone(), e.active_count()));
    BatchStats {
        email_count: emails.len(),
        average_active: total as f64 / emails.len() as f64,
        min_active: least.map_or(0, EmailAnalysis::active_count),
        max_active: most.map_or(0, EmailAnalysis::active_count),
        most_active: pick(most),
        least_active: pick(least),
        risk_distribution: distribution,
    }
}

fn frequency(emails: &[EmailAnalysis], limit: usize) -> Vec<SignalFrequency> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for email in emails {
        for signal in &email.active {
            *counts.entry(signal.name.as_str()).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<SignalFrequency> = counts
        .into_iter()
        .map(|(signal, count)| SignalFrequency {
            signal: signal.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.signal.cmp(&b.signal)));
    ranked.truncate(limit);
    ranked
}

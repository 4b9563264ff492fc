//! No-Action triage configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the No-Action triage pass.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TriageConfig {
    /// Ordered rule ids; a row lands in the first tier it matches.
    #[serde(default)]
    pub tiers: Vec<String>,
    /// Column holding the current classification.
    pub label_column: Option<String>,
    /// Value of `label_column` meaning "already No Action". Default: 1.
    pub no_action_label: Option<i64>,
    /// Passing SPF/DKIM/DMARC results needed for "good authentication". Default: 2.
    pub min_auth_passes: Option<usize>,
    /// Signal inspected for borderline cases.
    pub borderline_signal: Option<String>,
    /// Inclusive borderline range. Default: 0.4..=0.5.
    pub borderline_min: Option<f64>,
    pub borderline_max: Option<f64>,
    /// Signals summarized over the rows currently labelled No Action.
    #[serde(default)]
    pub summary_signals: Vec<String>,
}

impl TriageConfig {
    pub fn effective_tiers(&self) -> Vec<String> {
        if self.tiers.is_empty() {
            constants::DEFAULT_TIERS.iter().map(|s| s.to_string()).collect()
        } else {
            self.tiers.clone()
        }
    }

    pub fn effective_label_column(&self) -> &str {
        self.label_column
            .as_deref()
            .unwrap_or(constants::DEFAULT_LABEL_COLUMN)
    }

    pub fn effective_no_action_label(&self) -> i64 {
        self.no_action_label
            .unwrap_or(constants::DEFAULT_NO_ACTION_LABEL)
    }

    pub fn effective_min_auth_passes(&self) -> usize {
        self.min_auth_passes
            .unwrap_or(constants::DEFAULT_MIN_AUTH_PASSES)
    }

    pub fn effective_borderline_signal(&self) -> &str {
        self.borderline_signal
            .as_deref()
            .unwrap_or(constants::DEFAULT_BORDERLINE_SIGNAL)
    }

    pub fn effective_borderline_range(&self) -> (f64, f64) {
        (
            self.borderline_min.unwrap_or(constants::DEFAULT_BORDERLINE_MIN),
            self.borderline_max.unwrap_or(constants::DEFAULT_BORDERLINE_MAX),
        )
    }

    pub fn effective_summary_signals(&self) -> Vec<String> {
        if self.summary_signals.is_empty() {
            constants::DEFAULT_SUMMARY_SIGNALS
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            self.summary_signals.clone()
        }
    }
}

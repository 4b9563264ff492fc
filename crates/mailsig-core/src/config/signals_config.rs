//! Signal classification configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants;

/// A high-risk indicator: any active numeric signal whose name contains
/// `fragment` and whose value is strictly greater than `above`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighRiskThreshold {
    pub fragment: String,
    pub above: f64,
}

/// Inclusive upper bounds on the active-signal count per risk level.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RiskBands {
    /// Default: 2.
    pub low_max: Option<usize>,
    /// Default: 5.
    pub medium_max: Option<usize>,
    /// Default: 10.
    pub high_max: Option<usize>,
}

impl RiskBands {
    pub fn effective_low_max(&self) -> usize {
        self.low_max.unwrap_or(constants::DEFAULT_LOW_MAX)
    }

    pub fn effective_medium_max(&self) -> usize {
        self.medium_max.unwrap_or(constants::DEFAULT_MEDIUM_MAX)
    }

    pub fn effective_high_max(&self) -> usize {
        self.high_max.unwrap_or(constants::DEFAULT_HIGH_MAX)
    }
}

/// Configuration for the signal classifier.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SignalsConfig {
    /// Categorical signal -> states that make it active. Entries replace the
    /// built-in set for the same signal.
    #[serde(default)]
    pub positive_states: BTreeMap<String, Vec<String>>,
    /// High-risk indicators. Default: see `constants::DEFAULT_HIGH_RISK`.
    #[serde(default)]
    pub high_risk: Vec<HighRiskThreshold>,
    pub risk_bands: RiskBands,
}

impl SignalsConfig {
    /// Built-in positive sets overlaid with the configured ones.
    pub fn effective_positive_states(&self) -> BTreeMap<String, Vec<String>> {
        let mut states: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let auth: Vec<String> = constants::AUTH_FAILURE_STATES
            .iter()
            .map(|s| s.to_string())
            .collect();
        for signal in constants::AUTH_SIGNALS {
            states.insert(signal.to_string(), auth.clone());
        }
        states.insert(
            constants::SSL_SIGNAL.to_string(),
            constants::SSL_FAILURE_STATES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        for (signal, positive) in &self.positive_states {
            states.insert(signal.clone(), positive.clone());
        }
        states
    }

    pub fn effective_high_risk(&self) -> Vec<HighRiskThreshold> {
        if self.high_risk.is_empty() {
            constants::DEFAULT_HIGH_RISK
                .iter()
                .map(|(fragment, above)| HighRiskThreshold {
                    fragment: fragment.to_string(),
                    above: *above,
                })
                .collect()
        } else {
            self.high_risk.clone()
        }
    }
}

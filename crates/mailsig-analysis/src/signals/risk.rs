//! Risk level, recommendation, and high-risk indicators.

use std::fmt;

use mailsig_core::config::{HighRiskThreshold, SignalsConfig};
use serde::Serialize;

use super::active::ActiveSignal;

/// Risk level derived from the number of active signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 5] = [
        Self::VeryLow,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::VeryHigh,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "VERY LOW",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::VeryHigh => "VERY HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Suggested follow-up for an email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    InvestigateFurther,
    Monitor,
    LikelyLegitimate,
}

impl Recommendation {
    pub fn label(self) -> &'static str {
        match self {
            Self::InvestigateFurther => "Investigate further",
            Self::Monitor => "Monitor",
            Self::LikelyLegitimate => "Likely legitimate",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An active numeric signal over its high-risk threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighRiskIndicator {
    pub signal: String,
    pub value: f64,
}

impl fmt::Display for HighRiskIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.signal, self.value)
    }
}

/// Risk bands and high-risk thresholds.
#[derive(Debug, Clone)]
pub struct RiskModel {
    low_max: usize,
    medium_max: usize,
    high_max: usize,
    thresholds: Vec<HighRiskThreshold>,
}

impl RiskModel {
    pub fn from_config(config: &SignalsConfig) -> Self {
        let bands = &config.risk_bands;
        Self {
            low_max: bands.effective_low_max(),
            medium_max: bands.effective_medium_max(),
            high_max: bands.effective_high_max(),
            thresholds: config
                .effective_high_risk()
                .into_iter()
                .map(|t| HighRiskThreshold {
                    fragment: t.fragment.to_ascii_lowercase(),
                    above: t.above,
                })
                .collect(),
        }
    }

    pub fn level(&self, active_count: usize) -> RiskLevel {
        match active_count {
            0 => RiskLevel::VeryLow,
            n if n <= self.low_max => RiskLevel::Low,
            n if n <= self.medium_max => RiskLevel::Medium,
            n if n <= self.high_max => RiskLevel::High,
            _ => RiskLevel::VeryHigh,
        }
    }

    /// Above the medium band: investigate. Above the low band: monitor.
    pub fn recommendation(&self, active_count: usize) -> Recommendation {
        if active_count > self.medium_max {
            Recommendation::InvestigateFurther
        } else if active_count > self.low_max {
            Recommendation::Monitor
        } else {
            Recommendation::LikelyLegitimate
        }
    }

    /// Active numeric signals strictly above any matching threshold. A
    /// signal matching several fragments is reported once.
    pub fn high_risk(&self, active: &[ActiveSignal]) -> Vec<HighRiskIndicator> {
        active
            .iter()
            .filter_map(|signal| {
                let value = signal.value.as_f64()?;
                let name = signal.name.to_ascii_lowercase();
                self.thresholds
                    .iter()
                    .any(|t| name.contains(&t.fragment) && value > t.above)
                    .then(|| HighRiskIndicator {
                        signal: signal.name.clone(),
                        value,
                    })
            })
            .collect()
    }
}

impl Default for RiskModel {
    fn default() -> Self {
        Self::from_config(&SignalsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::SignalCategory;
    use mailsig_core::types::SignalValue;

    fn active(name: &str, value: SignalValue) -> ActiveSignal {
        ActiveSignal {
            name: name.to_string(),
            category: SignalCategory::of(name),
            value,
        }
    }

    #[test]
    fn default_bands() {
        let model = RiskModel::default();
        assert_eq!(model.level(0), RiskLevel::VeryLow);
        assert_eq!(model.level(2), RiskLevel::Low);
        assert_eq!(model.level(3), RiskLevel::Medium);
        assert_eq!(model.level(5), RiskLevel::Medium);
        assert_eq!(model.level(10), RiskLevel::High);
        assert_eq!(model.level(11), RiskLevel::VeryHigh);
    }

    #[test]
    fn recommendations_follow_band_edges() {
        let model = RiskModel::default();
        assert_eq!(model.recommendation(2), Recommendation::LikelyLegitimate);
        assert_eq!(model.recommendation(3), Recommendation::Monitor);
        assert_eq!(model.recommendation(6), Recommendation::InvestigateFurther);
    }

    #[test]
    fn thresholds_are_strict() {
        let model = RiskModel::default();
        let signals = vec![
            active("max_behavioral_sandbox_score", SignalValue::Score(0.2)),
            active("sender_temp_email_likelihood", SignalValue::Score(0.51)),
            active("malicious_attachment_Count", SignalValue::Integer(1)),
            active("spf_result", SignalValue::Text("fail".into())),
        ];
        let hits: Vec<String> = model.high_risk(&signals).iter().map(|h| h.signal.clone()).collect();
        assert_eq!(hits, vec!["sender_temp_email_likelihood", "malicious_attachment_Count"]);
    }
}

//! JSON reporter: structured dump of a batch analysis.

use mailsig_core::errors::ReportError;
use serde_json::json;

use super::Reporter;
use crate::analysis::BatchAnalysis;

/// JSON reporter for machine-readable output.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn generate(&self, analysis: &BatchAnalysis) -> Result<String, ReportError> {
        let emails: Vec<serde_json::Value> = analysis
            .emails
            .iter()
            .map(|e| {
                json!({
                    "label": e.label,
                    "active_count": e.active_count(),
                    "activity_percentage": e.activity_percentage(analysis.signal_count),
                    "risk_level": e.risk_level.label(),
                    "recommendation": e.recommendation.label(),
                    "category_counts": e.category_counts,
                    "high_risk": e.high_risk,
                    "numeric_total": e.numeric_total,
                    "top_numeric": e.top_numeric.iter().map(|(signal, value)| json!({
                        "signal": signal,
                        "value": value,
                    })).collect::<Vec<_>>(),
                    "active": e.active,
                    "inactive": e.inactive,
                })
            })
            .collect();

        let output = json!({
            "source": analysis.source,
            "span": analysis.span(),
            "signal_count": analysis.signal_count,
            "stats": analysis.stats,
            "signal_frequency": analysis.signal_frequency,
            "emails": emails,
        });

        serde_json::to_string_pretty(&output).map_err(|e| ReportError::RenderFailed {
            format: "json".to_string(),
            message: e.to_string(),
        })
    }
}

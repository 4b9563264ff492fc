//! CSV summary reporter: one row per email.

use mailsig_core::constants;
use mailsig_core::errors::ReportError;

use super::Reporter;
use crate::analysis::BatchAnalysis;
use crate::signals::SignalCategory;

pub const HEADER: [&str; 13] = [
    "Email_ID",
    "Total_Signals_Triggered",
    "Signal_Activity_Percentage",
    "Risk_Level",
    "Sender_Signals",
    "Auth_Signals",
    "Attachment_Signals",
    "Content_Signals",
    "URL_Signals",
    "Behavioral_Signals",
    "Other_Signals",
    "High_Risk_Signals",
    "High_Risk_Details",
];

/// CSV summary reporter.
pub struct CsvSummaryReporter;

impl Reporter for CsvSummaryReporter {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn extension(&self) -> &'static str {
        "csv"
    }

    fn generate(&self, analysis: &BatchAnalysis) -> Result<String, ReportError> {
        let render_err = |message: String| ReportError::RenderFailed {
            format: "csv".to_string(),
            message,
        };

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(HEADER)
            .map_err(|e| render_err(e.to_string()))?;

        for email in &analysis.emails {
            let details = if email.high_risk.is_empty() {
                "None".to_string()
            } else {
                email
                    .high_risk
                    .iter()
                    .take(constants::HIGH_RISK_DETAIL_LIMIT)
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ")
            };
            let count = |c: SignalCategory| email.category_count(c).to_string();
            writer
                .write_record([
                    email.label.clone(),
                    email.active_count().to_string(),
                    format!("{:.1}", email.activity_percentage(analysis.signal_count)),
                    email.risk_level.label().to_string(),
                    count(SignalCategory::Sender),
                    count(SignalCategory::Authentication),
                    count(SignalCategory::Attachment),
                    count(SignalCategory::Content),
                    count(SignalCategory::Url),
                    count(SignalCategory::Behavioral),
                    count(SignalCategory::Other),
                    email.high_risk.len().to_string(),
                    details,
                ])
                .map_err(|e| render_err(e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| render_err(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| render_err(e.to_string()))
    }
}

//! Reporters: output formats for batch analyses and triage runs.
//!
//! 3 batch formats (text, CSV summary, JSON) plus the triage text report.

pub mod csv_summary;
pub mod json;
pub mod text;
pub mod triage;

use std::path::{Path, PathBuf};

use mailsig_core::errors::ReportError;
use mailsig_core::tracing::events;

use crate::analysis::BatchAnalysis;

pub use csv_summary::CsvSummaryReporter;
pub use json::JsonReporter;
pub use text::TextReporter;
pub use triage::TriageReporter;

/// Trait for batch report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    /// File extension written by [`write_report`].
    fn extension(&self) -> &'static str;
    fn generate(&self, analysis: &BatchAnalysis) -> Result<String, ReportError>;
}

/// Create a reporter by format name.
pub fn create_reporter(format: &str) -> Option<Box<dyn Reporter>> {
    match format {
        "text" => Some(Box::new(TextReporter)),
        "csv" => Some(Box::new(CsvSummaryReporter)),
        "json" => Some(Box::new(JsonReporter)),
        _ => None,
    }
}

/// List all available report format names.
pub fn available_formats() -> &'static [&'static str] {
    &["text", "csv", "json"]
}

/// An email label made safe for a file name: anything outside
/// `[A-Za-z0-9_-]` becomes `_`.
pub fn file_label(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// File stem for a batch report: `D61_D65_analysis`, or `D7_analysis`
/// for a single email.
pub fn report_stem(analysis: &BatchAnalysis) -> String {
    match (analysis.emails.first(), analysis.emails.last()) {
        (Some(first), Some(last)) if analysis.emails.len() > 1 => format!(
            "{}_{}_analysis",
            file_label(&first.label),
            file_label(&last.label)
        ),
        (Some(only), _) => format!("{}_analysis", file_label(&only.label)),
        _ => "empty_analysis".to_string(),
    }
}

/// Render `analysis` with `reporter` and write `<dir>/<stem>.<ext>`.
pub fn write_report(
    dir: &Path,
    stem: &str,
    reporter: &dyn Reporter,
    analysis: &BatchAnalysis,
) -> Result<PathBuf, ReportError> {
    let content = reporter.generate(analysis)?;
    let path = dir.join(format!("{stem}.{}", reporter.extension()));
    write_file(&path, &content)?;
    events::report_written(&path.display().to_string(), reporter.name());
    Ok(path)
}

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<(), ReportError> {
    let wrap = |source: std::io::Error| ReportError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(wrap)?;
    }
    std::fs::write(path, content).map_err(wrap)
}

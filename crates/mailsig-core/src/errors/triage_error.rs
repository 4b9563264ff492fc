//! Top-level errors and non-fatal diagnostic collection.

use super::error_code::MailsigErrorCode;
use super::{ConfigError, IngestError, ReportError, RuleError};

/// Errors that abort a triage run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl MailsigErrorCode for TriageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Ingest(e) => e.error_code(),
            Self::Rule(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// A non-fatal condition observed during a run (fallback detection,
/// skipped rows, empty selections).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub source: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn new(source: &'static str, message: impl Into<String>) -> Self {
        Self {
            source,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.source, self.message)
    }
}

/// Result of a run that accumulates non-fatal diagnostics.
/// Allows partial results to be returned even when some rows were skipped.
#[derive(Debug, Default)]
pub struct TriageResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal diagnostics collected during the run.
    pub diagnostics: Vec<Diagnostic>,
}

impl<T: Default> TriageResult<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            diagnostics: Vec::new(),
        }
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Returns true if there are no diagnostics.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.len()
    }
}

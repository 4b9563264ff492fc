//! Report generation errors.

use std::path::PathBuf;

use super::error_code::{self, MailsigErrorCode};

/// Errors that can occur while rendering or writing reports.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to render {format} report: {message}")]
    RenderFailed { format: String, message: String },

    #[error("Failed to write report {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl MailsigErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        error_code::REPORT_ERROR
    }
}

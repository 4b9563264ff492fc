//! MailsigErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to provide a structured
/// error code string for scripts consuming CLI output.
pub trait MailsigErrorCode {
    /// Returns the error code string (e.g., "INGEST_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INGEST_ERROR: &str = "INGEST_ERROR";
pub const FILE_NOT_FOUND: &str = "FILE_NOT_FOUND";
pub const MALFORMED_INPUT: &str = "MALFORMED_INPUT";
pub const SELECTION_ERROR: &str = "SELECTION_ERROR";
pub const RULE_ERROR: &str = "RULE_ERROR";
pub const UNKNOWN_RULE: &str = "UNKNOWN_RULE";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";

//! Error handling for mailsig.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod ingest_error;
pub mod report_error;
pub mod rule_error;
pub mod triage_error;

pub use config_error::ConfigError;
pub use error_code::MailsigErrorCode;
pub use ingest_error::IngestError;
pub use report_error::ReportError;
pub use rule_error::RuleError;
pub use triage_error::{Diagnostic, TriageError, TriageResult};

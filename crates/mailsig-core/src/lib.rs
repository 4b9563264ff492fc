//! # mailsig-core
//!
//! Foundation crate for mailsig.
//! Defines the row/signal types, errors, config, tracing, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::MailsigConfig;
pub use errors::{MailsigErrorCode, TriageError, TriageResult};
pub use types::{ActivePredicate, EmailId, Row, Schema, SignalDefinition, SignalKind, SignalValue};

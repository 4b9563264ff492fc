//! Ingest errors.

use std::path::PathBuf;

use super::error_code::{self, MailsigErrorCode};

/// Errors that can occur while reading or writing a signal batch.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Input file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed input {path} at record {record}: {message}")]
    Malformed {
        path: PathBuf,
        record: u64,
        message: String,
    },

    #[error("Input {path} has no header row")]
    EmptyInput { path: PathBuf },

    #[error("Invalid email id selection '{input}': {message}")]
    InvalidSelection { input: String, message: String },
}

impl MailsigErrorCode for IngestError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => error_code::FILE_NOT_FOUND,
            Self::Malformed { .. } | Self::EmptyInput { .. } => error_code::MALFORMED_INPUT,
            Self::InvalidSelection { .. } => error_code::SELECTION_ERROR,
            Self::Io { .. } => error_code::INGEST_ERROR,
        }
    }
}

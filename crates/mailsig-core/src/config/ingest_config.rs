//! Ingest configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for reading signal batches.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IngestConfig {
    /// Explicit id column name. Default: auto-detect.
    pub id_column: Option<String>,
    /// Regex an id cell must match during auto-detection. Default: `D\d+`.
    pub id_pattern: Option<String>,
    /// Field delimiter. Default: `,`.
    pub delimiter: Option<char>,
}

impl IngestConfig {
    pub fn effective_id_pattern(&self) -> &str {
        self.id_pattern
            .as_deref()
            .unwrap_or(constants::DEFAULT_ID_PATTERN)
    }

    pub fn effective_delimiter(&self) -> u8 {
        self.delimiter
            .filter(char::is_ascii)
            .map(|c| c as u8)
            .unwrap_or(b',')
    }
}

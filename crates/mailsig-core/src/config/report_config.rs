//! Report configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for report rendering and output.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory reports are written into. Default: current directory.
    pub output_dir: Option<PathBuf>,
    /// Formats written by `report`: "text" | "csv" | "json". Default: text + csv.
    #[serde(default)]
    pub formats: Vec<String>,
    /// Number of signals listed in "most common active signals". Default: 20.
    pub top_signals: Option<usize>,
    /// Number of top numeric signals listed per email. Default: 5.
    pub top_numeric: Option<usize>,
    /// Source name printed in report headers. Default: the input file name.
    pub source_name: Option<String>,
}

impl ReportConfig {
    pub fn effective_output_dir(&self) -> &Path {
        self.output_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(constants::DEFAULT_OUTPUT_DIR))
    }

    pub fn effective_formats(&self) -> Vec<String> {
        if self.formats.is_empty() {
            vec!["text".to_string(), "csv".to_string()]
        } else {
            self.formats.clone()
        }
    }

    pub fn effective_top_signals(&self) -> usize {
        self.top_signals.unwrap_or(constants::DEFAULT_TOP_SIGNALS)
    }

    pub fn effective_top_numeric(&self) -> usize {
        self.top_numeric.unwrap_or(constants::DEFAULT_TOP_NUMERIC)
    }
}

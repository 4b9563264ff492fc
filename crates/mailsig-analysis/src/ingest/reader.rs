//! CSV batch reader with id column detection.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mailsig_core::config::IngestConfig;
use mailsig_core::constants;
use mailsig_core::errors::IngestError;
use mailsig_core::tracing::events;
use mailsig_core::types::{Row, Schema};
use regex::Regex;

/// How the id column of a batch was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSource {
    /// `ingest.id_column` named it.
    Configured,
    /// A header name looked like an id column (`Data`, `email_id`, ...).
    HeaderHint,
    /// The first column's values matched the id pattern.
    ValuePattern,
    /// No id column; rows are labelled `row-<n>`.
    None,
}

impl IdSource {
    pub fn name(self) -> &'static str {
        match self {
            Self::Configured => "configured",
            Self::HeaderHint => "header_hint",
            Self::ValuePattern => "value_pattern",
            Self::None => "none",
        }
    }
}

/// One in-memory batch: the shared schema plus its rows in source order.
#[derive(Debug, Clone)]
pub struct Batch {
    source: PathBuf,
    schema: Arc<Schema>,
    rows: Vec<Row>,
    id_source: IdSource,
}

impl Batch {
    pub fn new(source: PathBuf, schema: Arc<Schema>, rows: Vec<Row>, id_source: IdSource) -> Self {
        Self {
            source,
            schema,
            rows,
            id_source,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// File name of the source, for report headers.
    pub fn source_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn id_source(&self) -> IdSource {
        self.id_source
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A batch over a subset of these rows, sharing the schema.
    pub fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self {
            source: self.source.clone(),
            schema: Arc::clone(&self.schema),
            rows,
            id_source: self.id_source,
        }
    }
}

/// Read a CSV batch from `path`.
pub fn read_batch(path: &Path, config: &IngestConfig) -> Result<Batch, IngestError> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_batch_from_reader(file, path, config)
}

/// Read a CSV batch from any reader. `source` is used for errors and reports.
pub fn read_batch_from_reader<R: Read>(
    reader: R,
    source: &Path,
    config: &IngestConfig,
) -> Result<Batch, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.effective_delimiter())
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| malformed(source, 0, &e))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::EmptyInput {
            path: source.to_path_buf(),
        });
    }

    let mut records: Vec<Vec<String>> = Vec::new();
    for (n, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| malformed(source, n as u64 + 1, &e))?;
        records.push(record.iter().map(str::to_string).collect());
    }

    let (id_column, id_source) = detect_id_column(&headers, &records, config)?;
    let schema = Arc::new(Schema::new(&headers, id_column));
    events::id_column_resolved(schema.id_column_name(), id_source.name());

    let rows: Vec<Row> = records
        .into_iter()
        .enumerate()
        .map(|(position, cells)| Row::from_cells(Arc::clone(&schema), position, cells))
        .collect();

    events::batch_loaded(&source.display().to_string(), rows.len(), schema.signal_count());

    Ok(Batch::new(source.to_path_buf(), schema, rows, id_source))
}

fn malformed(source: &Path, fallback_record: u64, err: &csv::Error) -> IngestError {
    let record = err
        .position()
        .map(csv::Position::record)
        .unwrap_or(fallback_record);
    IngestError::Malformed {
        path: source.to_path_buf(),
        record,
        message: err.to_string(),
    }
}

/// Resolve the id column: configured name, then a header hint, then the
/// first column's values against the id pattern.
fn detect_id_column(
    headers: &[String],
    records: &[Vec<String>],
    config: &IngestConfig,
) -> Result<(Option<usize>, IdSource), IngestError> {
    if let Some(wanted) = config.id_column.as_deref() {
        let wanted = wanted.trim();
        if let Some(idx) = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted))
        {
            return Ok((Some(idx), IdSource::Configured));
        }
        tracing::warn!(id_column = %wanted, "configured id column not present, detecting");
    }

    if let Some(idx) = headers.iter().position(|h| is_id_header(h)) {
        return Ok((Some(idx), IdSource::HeaderHint));
    }

    let pattern = Regex::new(config.effective_id_pattern()).map_err(|e| {
        IngestError::InvalidSelection {
            input: config.effective_id_pattern().to_string(),
            message: format!("id pattern does not compile: {e}"),
        }
    })?;
    let first_column_matches = records
        .iter()
        .take(constants::ID_SNIFF_ROWS)
        .filter_map(|cells| cells.first())
        .any(|cell| pattern.is_match(cell.trim()));
    if first_column_matches {
        return Ok((Some(0), IdSource::ValuePattern));
    }

    Ok((None, IdSource::None))
}

/// A header is an id hint when one of its words is a hint word, so
/// `Data `, `email_id`, and `Data ID` qualify but `ssl_validity_status` does not.
fn is_id_header(header: &str) -> bool {
    header
        .trim()
        .to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|word| constants::ID_COLUMN_HINTS.contains(&word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_hints_match_whole_words() {
        assert!(is_id_header("Data "));
        assert!(is_id_header("email_id"));
        assert!(is_id_header("Data ID"));
        assert!(!is_id_header("ssl_validity_status"));
        assert!(!is_id_header("sender_domain_valid"));
    }

    #[test]
    fn configured_column_wins_over_hints() {
        let headers = vec!["Data".to_string(), "label".to_string()];
        let config = IngestConfig {
            id_column: Some(" LABEL ".into()),
            ..Default::default()
        };
        let (idx, source) = detect_id_column(&headers, &[], &config).unwrap();
        assert_eq!(idx, Some(1));
        assert_eq!(source, IdSource::Configured);
    }

    #[test]
    fn first_column_values_are_sniffed() {
        let headers = vec!["col_a".to_string(), "score".to_string()];
        let records = vec![vec!["D4".to_string(), "0.1".to_string()]];
        let (idx, source) =
            detect_id_column(&headers, &records, &IngestConfig::default()).unwrap();
        assert_eq!(idx, Some(0));
        assert_eq!(source, IdSource::ValuePattern);
    }
}

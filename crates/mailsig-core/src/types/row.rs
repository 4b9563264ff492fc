//! Rows of one batch and the schema they share.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::email_id::EmailId;
use super::value::SignalValue;

/// Column layout of one batch. Every row of a batch holds the same `Arc<Schema>`,
/// so the signal set cannot differ between rows of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
    lookup: FxHashMap<String, usize>,
    id_column: Option<usize>,
}

impl Schema {
    /// Build a schema from header names (trimmed). On duplicate headers the
    /// first occurrence wins for lookups.
    pub fn new<I, S>(headers: I, id_column: Option<usize>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<String> = headers
            .into_iter()
            .map(|h| h.as_ref().trim().to_string())
            .collect();
        let mut lookup = FxHashMap::default();
        for (idx, name) in columns.iter().enumerate() {
            lookup.entry(name.clone()).or_insert(idx);
        }
        let id_column = id_column.filter(|&idx| idx < columns.len());
        Self {
            columns,
            lookup,
            id_column,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.lookup.get(name.trim()).copied()
    }

    pub fn id_column(&self) -> Option<usize> {
        self.id_column
    }

    pub fn id_column_name(&self) -> Option<&str> {
        self.id_column.map(|idx| self.columns[idx].as_str())
    }

    /// Names of the signal columns (every column except the id column).
    pub fn signal_names(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .enumerate()
            .filter(move |(idx, _)| Some(*idx) != self.id_column)
            .map(|(_, name)| name.as_str())
    }

    pub fn signal_count(&self) -> usize {
        self.columns.len() - usize::from(self.id_column.is_some())
    }
}

/// One email's detection signal vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    label: String,
    position: usize,
    schema: Arc<Schema>,
    values: Vec<SignalValue>,
    raw: Vec<String>,
}

impl Row {
    /// Build a row from raw cells. Cells beyond the schema are dropped and
    /// short rows are padded with `Missing`.
    pub fn from_cells(schema: Arc<Schema>, position: usize, cells: Vec<String>) -> Self {
        let width = schema.columns().len();
        let mut raw = cells;
        raw.resize(width, String::new());
        let values = raw.iter().map(|c| SignalValue::parse(c)).collect();
        let label = schema
            .id_column()
            .map(|idx| raw[idx].trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| format!("row-{}", position + 1));
        Self {
            label,
            position,
            schema,
            values,
            raw,
        }
    }

    /// Build a standalone row from typed pairs. The label becomes the id column.
    pub fn from_pairs<I, K, V>(label: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<SignalValue>,
    {
        let mut headers = vec!["Data".to_string()];
        let mut values = vec![SignalValue::Text(label.to_string())];
        for (k, v) in pairs {
            headers.push(k.as_ref().to_string());
            values.push(v.into());
        }
        let schema = Arc::new(Schema::new(&headers, Some(0)));
        let raw = values.iter().map(ToString::to_string).collect();
        Self {
            label: label.to_string(),
            position: 0,
            schema,
            values,
            raw,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Parsed `D<n>` id, if the label is one.
    pub fn email_id(&self) -> Option<EmailId> {
        EmailId::parse(&self.label)
    }

    /// Zero-based position in the source file.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn get(&self, name: &str) -> Option<&SignalValue> {
        self.schema.index_of(name).map(|idx| &self.values[idx])
    }

    /// Raw cell text, as read.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.schema.index_of(name).map(|idx| self.raw[idx].as_str())
    }

    pub fn raw_cells(&self) -> &[String] {
        &self.raw
    }

    /// Signal columns in source order, excluding the id column.
    pub fn signals(&self) -> impl Iterator<Item = (&str, &SignalValue)> {
        let id = self.schema.id_column();
        self.schema
            .columns()
            .iter()
            .zip(&self.values)
            .enumerate()
            .filter(move |(idx, _)| Some(*idx) != id)
            .map(|(_, (name, value))| (name.as_str(), value))
    }
}

//! Selecting rows of a batch by email id.

use mailsig_core::constants;
use mailsig_core::errors::Diagnostic;
use mailsig_core::tracing::events;
use mailsig_core::types::{EmailId, Row};
use rustc_hash::FxHashSet;

use super::reader::Batch;

/// Which strategy produced the selected rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStrategy {
    /// The id column matched the requested labels.
    IdColumn,
    /// Some cell of the row equals a requested label.
    CellScan,
    /// `D<n>` taken as source row `n - 1`.
    Positional,
    /// Nothing matched.
    Empty,
}

impl SelectionStrategy {
    pub fn name(self) -> &'static str {
        match self {
            Self::IdColumn => "id_column",
            Self::CellScan => "cell_scan",
            Self::Positional => "positional",
            Self::Empty => "empty",
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, Self::CellScan | Self::Positional)
    }
}

/// Rows picked out of a batch, with how they were found.
#[derive(Debug, Clone)]
pub struct Selection {
    pub batch: Batch,
    pub strategy: SelectionStrategy,
    /// Requested ids that no row answered to.
    pub missing: Vec<EmailId>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        self.batch.rows()
    }
}

/// Select the rows for `ids`. Never fails: when no strategy finds anything
/// the selection is empty and carries a diagnostic.
pub fn select(batch: &Batch, ids: &[EmailId]) -> Selection {
    let wanted: FxHashSet<EmailId> = ids.iter().copied().collect();

    let (rows, strategy) = if batch.schema().id_column().is_some() {
        (by_id_column(batch, &wanted), SelectionStrategy::IdColumn)
    } else {
        (by_cell_scan(batch, &wanted), SelectionStrategy::CellScan)
    };

    if !rows.is_empty() {
        if strategy.is_fallback() {
            events::selection_fallback(strategy.name(), ids.len(), rows.len());
        }
        let found: FxHashSet<EmailId> = rows.iter().filter_map(Row::email_id).collect();
        return finish(batch, rows, strategy, ids, &found);
    }

    if let Some(rows) = by_position(batch, ids) {
        events::selection_fallback(SelectionStrategy::Positional.name(), ids.len(), rows.len());
        let mut selection = finish(batch, rows, SelectionStrategy::Positional, ids, &wanted);
        selection.diagnostics.push(Diagnostic::new(
            "ingest",
            "no row carries the requested ids; selected by row position",
        ));
        return selection;
    }

    let sample: Vec<&str> = batch
        .rows()
        .iter()
        .take(constants::DIAGNOSTIC_SAMPLE_SIZE)
        .filter_map(|row| row.raw_cells().first().map(String::as_str))
        .collect();
    let diagnostic = Diagnostic::new(
        "ingest",
        format!(
            "no rows found for {}; first column starts with: [{}]",
            describe(ids),
            sample.join(", ")
        ),
    );
    tracing::warn!(%diagnostic, "empty selection");

    Selection {
        batch: batch.with_rows(Vec::new()),
        strategy: SelectionStrategy::Empty,
        missing: ids.to_vec(),
        diagnostics: vec![diagnostic],
    }
}

fn finish(
    batch: &Batch,
    rows: Vec<Row>,
    strategy: SelectionStrategy,
    ids: &[EmailId],
    found: &FxHashSet<EmailId>,
) -> Selection {
    let missing: Vec<EmailId> = ids.iter().filter(|id| !found.contains(id)).copied().collect();
    let mut diagnostics = Vec::new();
    if !missing.is_empty() {
        diagnostics.push(Diagnostic::new(
            "ingest",
            format!("{} requested ids not found: {}", missing.len(), describe(&missing)),
        ));
    }
    Selection {
        batch: batch.with_rows(rows),
        strategy,
        missing,
        diagnostics,
    }
}

fn by_id_column(batch: &Batch, wanted: &FxHashSet<EmailId>) -> Vec<Row> {
    batch
        .rows()
        .iter()
        .filter(|row| row.email_id().is_some_and(|id| wanted.contains(&id)))
        .cloned()
        .collect()
}

/// Rows where any cell is exactly one of the wanted labels. Whole-cell
/// matching keeps `D6` from picking up `D61`.
fn by_cell_scan(batch: &Batch, wanted: &FxHashSet<EmailId>) -> Vec<Row> {
    batch
        .rows()
        .iter()
        .filter(|row| {
            row.raw_cells()
                .iter()
                .filter_map(|cell| EmailId::parse(cell))
                .any(|id| wanted.contains(&id))
        })
        .cloned()
        .collect()
}

/// Only used when every requested position exists.
fn by_position(batch: &Batch, ids: &[EmailId]) -> Option<Vec<Row>> {
    if ids.is_empty() || ids.iter().any(|id| id.position() >= batch.len()) {
        return None;
    }
    Some(ids.iter().map(|id| batch.rows()[id.position()].clone()).collect())
}

fn describe(ids: &[EmailId]) -> String {
    match ids {
        [] => "no ids".to_string(),
        [only] => only.to_string(),
        [first, .., last] => format!("{first}..{last} ({} ids)", ids.len()),
    }
}

//! Structured log events for key operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a batch load.
pub fn batch_loaded(path: &str, rows: usize, signals: usize) {
    tracing::info!(
        event = "batch_loaded",
        input_path = %path,
        row_count = rows,
        signal_count = signals,
        "batch loaded"
    );
}

/// Log how the id column was resolved.
pub fn id_column_resolved(column: Option<&str>, source: &str) {
    tracing::debug!(
        event = "id_column_resolved",
        column = ?column,
        source = %source,
        "id column resolved"
    );
}

/// Log a selection that needed a fallback strategy.
pub fn selection_fallback(strategy: &str, requested: usize, found: usize) {
    tracing::warn!(
        event = "selection_fallback",
        selection_strategy = %strategy,
        requested = requested,
        found = found,
        "exact id match failed, used fallback selection"
    );
}

/// Log a row that a rule could not evaluate (missing or unparseable signal).
pub fn row_skipped(row: &str, rule_id: &str, signal: &str) {
    tracing::debug!(
        event = "row_skipped",
        row = %row,
        rule_id = %rule_id,
        signal = %signal,
        "row treated as non-matching"
    );
}

/// Log the outcome of a rule over a batch.
pub fn rule_evaluated(rule_id: &str, rows: usize, matched: usize) {
    tracing::info!(
        event = "rule_evaluated",
        rule_id = %rule_id,
        row_count = rows,
        matched = matched,
        "rule evaluated"
    );
}

/// Log a written report artifact.
pub fn report_written(path: &str, format: &str) {
    tracing::info!(
        event = "report_written",
        path = %path,
        report_format = %format,
        "report written"
    );
}

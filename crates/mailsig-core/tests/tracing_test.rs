//! Tests for the tracing setup.

use std::sync::Mutex;

use mailsig_core::tracing::{events, init_tracing, init_tracing_with_default};

/// Serializes tests that touch the environment.
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn init_tracing_is_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    init_tracing_with_default("mailsig=debug");
}

#[test]
fn invalid_filter_falls_back_to_default() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("MAILSIG_LOG", "this is not a filter ===");
    init_tracing();
    std::env::remove_var("MAILSIG_LOG");
}

#[test]
fn events_emit_without_subscriber_panics() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    events::batch_loaded("batch.csv", 5, 68);
    events::id_column_resolved(Some("Data"), "header_hint");
    events::selection_fallback("positional", 5, 5);
    events::row_skipped("D3", "high-confidence-no-action", "content_spam_score");
    events::rule_evaluated("high-confidence-no-action", 5, 1);
    events::report_written("out.txt", "text");
}

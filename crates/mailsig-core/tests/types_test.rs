//! Tests for rows, schemas, and signal predicates.

use std::sync::Arc;

use mailsig_core::types::*;
use proptest::prelude::*;

fn schema() -> Arc<Schema> {
    Arc::new(Schema::new(
        ["Data ", "content_spam_score", "spf_result", "malicious_attachment_Count"],
        Some(0),
    ))
}

// ── Schema & Row ──────────────────────────────────────────────────────────

#[test]
fn headers_are_trimmed_and_id_column_excluded_from_signals() {
    let schema = schema();
    assert_eq!(schema.id_column_name(), Some("Data"));
    assert_eq!(schema.signal_count(), 3);
    assert_eq!(schema.index_of("Data "), Some(0));
    let names: Vec<&str> = schema.signal_names().collect();
    assert_eq!(
        names,
        vec!["content_spam_score", "spf_result", "malicious_attachment_Count"]
    );
}

#[test]
fn row_reads_cells_and_pads_short_records() {
    let row = Row::from_cells(schema(), 4, vec!["D5".into(), "0.02".into()]);
    assert_eq!(row.label(), "D5");
    assert_eq!(row.email_id().map(|id| id.number()), Some(5));
    assert_eq!(row.get("content_spam_score"), Some(&SignalValue::Score(0.02)));
    assert_eq!(row.get("spf_result"), Some(&SignalValue::Missing));
    assert_eq!(row.get("unknown"), None);
    assert_eq!(row.signals().count(), 3);
}

#[test]
fn rows_without_id_column_get_positional_labels() {
    let schema = Arc::new(Schema::new(["a", "b"], None));
    let row = Row::from_cells(schema, 2, vec!["1".into(), "0".into()]);
    assert_eq!(row.label(), "row-3");
    assert!(row.email_id().is_none());
}

#[test]
fn pairs_build_a_standalone_row() {
    let row = Row::from_pairs(
        "D32",
        [
            ("reputation", SignalValue::from(0.9)),
            ("request_type", SignalValue::from("none")),
        ],
    );
    assert_eq!(row.label(), "D32");
    assert_eq!(row.get("reputation").and_then(SignalValue::as_f64), Some(0.9));
    assert_eq!(row.raw("request_type"), Some("none"));
}

// ── Active predicates ─────────────────────────────────────────────────────

#[test]
fn non_zero_predicate() {
    let p = ActivePredicate::NonZero;
    assert!(p.is_active(&SignalValue::Score(0.3)));
    assert!(p.is_active(&SignalValue::Integer(-1)));
    assert!(!p.is_active(&SignalValue::Integer(0)));
    assert!(!p.is_active(&SignalValue::Missing));
    assert!(!p.is_active(&SignalValue::Text("fail".into())));
}

#[test]
fn positive_set_predicate_is_case_insensitive() {
    let def = SignalDefinition::categorical("spf_result", ["Fail", "softfail"]);
    assert!(def.is_active(&SignalValue::Text("FAIL".into())));
    assert!(def.is_active(&SignalValue::Text("softfail".into())));
    assert!(!def.is_active(&SignalValue::Text("pass".into())));
    assert!(!def.is_active(&SignalValue::Missing));
}

#[test]
fn non_null_predicate_counts_zero_as_present() {
    assert!(ActivePredicate::NonNull.is_active(&SignalValue::Integer(0)));
    assert!(!ActivePredicate::NonNull.is_active(&SignalValue::Missing));
}

#[test]
fn inferred_definitions_pick_kind_from_sample() {
    let flag = SignalDefinition::inferred("x", &SignalValue::Integer(1));
    assert_eq!(flag.kind, SignalKind::Flag);
    let text = SignalDefinition::inferred("y", &SignalValue::Text("pass".into()));
    assert_eq!(text.kind, SignalKind::Categorical);
    assert!(!text.is_active(&SignalValue::Text("pass".into())));
}

#[test]
fn serde_uses_sheet_notation() {
    let id: EmailId = serde_json::from_str("\"D42\"").unwrap();
    assert_eq!(id.number(), 42);
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"D42\"");
    assert!(serde_json::from_str::<EmailId>("\"X42\"").is_err());

    let values: Vec<SignalValue> = serde_json::from_str("[null, 3, 0.5, \"pass\"]").unwrap();
    assert_eq!(
        values,
        vec![
            SignalValue::Missing,
            SignalValue::Integer(3),
            SignalValue::Score(0.5),
            SignalValue::Text("pass".into()),
        ]
    );
}

// ── Properties ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn parsing_any_cell_never_panics(raw in ".{0,24}") {
        let _ = SignalValue::parse(&raw);
    }

    #[test]
    fn parsed_numbers_are_finite(raw in "[-+]?[0-9]{0,6}(\\.[0-9]{0,6})?(e[-+]?[0-9]{1,3})?") {
        if let Some(v) = SignalValue::parse(&raw).as_f64() {
            prop_assert!(v.is_finite());
        }
    }

    #[test]
    fn email_id_display_round_trips(n in 1u32..100_000) {
        let id = EmailId::new(n).unwrap();
        prop_assert_eq!(EmailId::parse(&id.to_string()), Some(id));
    }
}

//! Signal classifier and rule tests, including property tests.

mod common;

use mailsig_analysis::rules::builtin::{self, HIGH_CONFIDENCE_NO_ACTION};
use mailsig_analysis::rules::{
    classify, evaluate, matching_rows, ClassificationRule, Predicate, PredicateOutcome, RuleSet,
    TomlRuleLoader,
};
use mailsig_analysis::signals::{active_signals, SignalCategory, SignalRegistry};
use mailsig_core::config::{RulesConfig, SignalsConfig};
use mailsig_core::errors::{error_code, MailsigErrorCode, RuleError};
use mailsig_core::types::{Row, SignalValue};
use proptest::prelude::*;
use tempfile::TempDir;

use common::sample_batch;

/// The high-confidence rule over short signal names.
const SHORT_RULE: &str = r#"
[[rules]]
id = "high-confidence-no-action"
name = "High-confidence No Action"

[[rules.predicates]]
signal = "reputation"
op = "gt"
value = 0.5

[[rules.predicates]]
signal = "spam"
op = "lt"
value = 0.1

[[rules.predicates]]
signal = "malicious_attachment"
op = "eq"
value = 0

[[rules.predicates]]
signal = "spoof"
op = "=="
value = 0

[[rules.predicates]]
signal = "request_type"
op = "not_in"
values = ["bank_detail_update", "gift_card_request", "password_reset", "payment_request"]
"#;

fn short_rule() -> ClassificationRule {
    TomlRuleLoader::load_from_str(SHORT_RULE)
        .unwrap()
        .require(HIGH_CONFIDENCE_NO_ACTION)
        .unwrap()
        .clone()
}

fn clean_row(malicious_attachment: i64) -> Row {
    Row::from_pairs(
        "D1",
        [
            ("reputation", SignalValue::from(0.9)),
            ("spam", SignalValue::from(0.01)),
            ("malicious_attachment", SignalValue::from(malicious_attachment)),
            ("spoof", SignalValue::from(0_i64)),
            ("request_type", SignalValue::from("none")),
        ],
    )
}

// ---------------------------------------------------------------------------
// classify
// ---------------------------------------------------------------------------

#[test]
fn clean_row_matches_high_confidence() {
    assert!(classify(&clean_row(0), &short_rule()));
}

#[test]
fn one_malicious_attachment_breaks_the_match() {
    assert!(!classify(&clean_row(1), &short_rule()));
}

#[test]
fn missing_signal_is_false_not_an_error() {
    let row = Row::from_pairs(
        "D1",
        [
            ("reputation", SignalValue::from(0.9)),
            ("malicious_attachment", SignalValue::from(0_i64)),
            ("spoof", SignalValue::from(0_i64)),
            ("request_type", SignalValue::from("none")),
        ],
    );
    let rule = short_rule();
    assert!(!classify(&row, &rule));

    let verdict = evaluate(&row, &rule);
    assert!(!verdict.matched);
    assert_eq!(verdict.outcomes[1], PredicateOutcome::Missing);
    assert_eq!(verdict.failure_count(), 1);
    let (predicate, _) = verdict.failures(&rule).next().unwrap();
    assert_eq!(predicate.signal, "spam");
}

#[test]
fn unparseable_value_fails_the_rule() {
    let rule = ClassificationRule::new("r", "r").with(Predicate::gt("reputation", 0.5));
    let row = Row::from_pairs("D1", [("reputation", "high")]);
    assert!(!classify(&row, &rule));
    assert_eq!(
        evaluate(&row, &rule).outcomes.as_slice(),
        &[PredicateOutcome::Unparseable]
    );
}

#[test]
fn impossible_rule_matches_no_rows() {
    let batch = sample_batch();
    let rule = ClassificationRule::new("impossible", "Impossible")
        .with(Predicate::gt("sender_domain_reputation_score", 1.1));
    assert!(matching_rows(batch.rows(), &rule).is_empty());
}

#[test]
fn builtin_rules_over_sample() {
    let batch = sample_batch();
    let rules = RuleSet::builtin();
    let matched = |id: &str| -> Vec<String> {
        matching_rows(batch.rows(), rules.require(id).unwrap())
            .iter()
            .map(|r| r.label().to_string())
            .collect()
    };
    assert_eq!(matched(builtin::HIGH_CONFIDENCE_NO_ACTION), vec!["D1", "D2"]);
    assert_eq!(matched(builtin::MEDIUM_CONFIDENCE_NO_ACTION), vec!["D1", "D2", "D3"]);
    assert_eq!(matched(builtin::LEGITIMATE_EMAIL), vec!["D1", "D2"]);
    assert_eq!(matched(builtin::NO_ACTION_CANDIDATE), vec!["D1", "D2"]);
}

// ---------------------------------------------------------------------------
// active_signals
// ---------------------------------------------------------------------------

#[test]
fn active_signals_over_sample() {
    let batch = sample_batch();
    let registry = SignalRegistry::default();
    let d1 = active_signals(&batch.rows()[0], &registry);
    let d1: Vec<&str> = d1.iter().map(String::as_str).collect();
    assert_eq!(
        d1,
        vec![
            "content_spam_score",
            "sender_domain_reputation_score",
            "total_components_detected_malicious"
        ]
    );

    let d4 = active_signals(&batch.rows()[3], &registry);
    assert_eq!(d4.len(), 17);
    assert!(d4.contains("dkim_result"));
    assert!(d4.contains("ssl_validity_status"));
    assert!(!d4.contains("request_type"));
}

#[test]
fn configured_positive_states_replace_builtin() {
    let mut config = SignalsConfig::default();
    config
        .positive_states
        .insert("spf_result".into(), vec!["softfail".into()]);
    config
        .positive_states
        .insert("request_type".into(), vec!["payment_request".into()]);
    let registry = SignalRegistry::from_config(&config);

    let row = Row::from_pairs(
        "D1",
        [("spf_result", "fail"), ("dkim_result", "fail"), ("request_type", "Payment_Request")],
    );
    let active = active_signals(&row, &registry);
    assert!(!active.contains("spf_result"));
    assert!(active.contains("dkim_result"));
    assert!(active.contains("request_type"));
}

#[test]
fn categories_of_sample_columns() {
    assert_eq!(SignalCategory::of("dmarc_result"), SignalCategory::Authentication);
    assert_eq!(SignalCategory::of("sender_spoof_detected"), SignalCategory::Sender);
    assert_eq!(SignalCategory::of("urgency_keywords_present"), SignalCategory::Content);
}

// ---------------------------------------------------------------------------
// TOML rules and rule sets
// ---------------------------------------------------------------------------

#[test]
fn toml_rules_validate_operands() {
    let missing_value = r#"
[[rules]]
id = "a"
[[rules.predicates]]
signal = "x"
op = "gt"
"#;
    assert!(matches!(
        TomlRuleLoader::load_from_str(missing_value),
        Err(RuleError::InvalidPredicate { .. })
    ));

    let missing_values = r#"
[[rules]]
id = "a"
[[rules.predicates]]
signal = "x"
op = "in"
"#;
    assert!(matches!(
        TomlRuleLoader::load_from_str(missing_values),
        Err(RuleError::InvalidPredicate { .. })
    ));
}

#[test]
fn toml_rules_reject_empty_and_duplicate_rules() {
    let empty = "[[rules]]\nid = \"a\"\n";
    assert!(matches!(
        TomlRuleLoader::load_from_str(empty),
        Err(RuleError::EmptyRule(id)) if id == "a"
    ));

    let dup = format!("{SHORT_RULE}\n{SHORT_RULE}");
    assert!(matches!(
        TomlRuleLoader::load_from_str(&dup),
        Err(RuleError::DuplicateRule(_))
    ));

    let bad_op = "[[rules]]\nid = \"a\"\n[[rules.predicates]]\nsignal = \"x\"\nop = \"about\"\nvalue = 1\n";
    assert!(matches!(
        TomlRuleLoader::load_from_str(bad_op),
        Err(RuleError::ParseError(_))
    ));
}

#[test]
fn disabled_toml_rules_are_skipped() {
    let toml = r#"
[[rules]]
id = "off"
enabled = false
[[rules.predicates]]
signal = "x"
op = "ge"
value = 1
"#;
    assert!(TomlRuleLoader::load_from_str(toml).unwrap().is_empty());
}

#[test]
fn merge_replaces_builtin_in_place() {
    let mut rules = RuleSet::builtin();
    let before: Vec<String> = rules.ids().map(str::to_string).collect();
    rules.merge(TomlRuleLoader::load_from_str(SHORT_RULE).unwrap());
    let after: Vec<String> = rules.ids().map(str::to_string).collect();
    assert_eq!(before, after);
    assert_eq!(
        rules.require(HIGH_CONFIDENCE_NO_ACTION).unwrap().predicates.len(),
        5
    );
}

#[test]
fn load_applies_file_and_disabled_ids() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.toml");
    std::fs::write(
        &path,
        "[[rules]]\nid = \"custom\"\n[[rules.predicates]]\nsignal = \"x\"\nop = \"le\"\nvalue = 2\n",
    )
    .unwrap();
    let config = RulesConfig {
        path: Some(path),
        disabled: vec![builtin::LEGITIMATE_EMAIL.to_string()],
    };
    let rules = RuleSet::load(&config).unwrap();
    assert!(rules.get("custom").is_some());
    assert!(rules.get(builtin::LEGITIMATE_EMAIL).is_none());
    assert_eq!(rules.len(), 4);
}

#[test]
fn unknown_rule_has_its_own_code() {
    let err = RuleSet::builtin().require("nope").unwrap_err();
    assert_eq!(err.error_code(), error_code::UNKNOWN_RULE);
}

#[test]
fn rule_set_rejects_empty_rules() {
    let err = RuleSet::new(vec![ClassificationRule::new("empty", "Empty")]).unwrap_err();
    assert!(matches!(err, RuleError::EmptyRule(_)));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("nan".to_string()),
        any::<f64>().prop_map(|f| f.to_string()),
        any::<i64>().prop_map(|i| i.to_string()),
        "[a-zA-Z_ ]{0,12}",
    ]
}

proptest! {
    #[test]
    fn classify_never_panics(reputation in arb_cell(), spam in arb_cell(), request in arb_cell()) {
        let row = Row::from_pairs(
            "D1",
            [
                ("reputation", SignalValue::parse(&reputation)),
                ("spam", SignalValue::parse(&spam)),
                ("request_type", SignalValue::parse(&request)),
            ],
        );
        let rule = short_rule();
        let matched = classify(&row, &rule);
        // The row lacks malicious_attachment and spoof.
        prop_assert!(!matched);
        prop_assert_eq!(evaluate(&row, &rule).matched, matched);
    }

    #[test]
    fn active_signals_is_idempotent(cells in proptest::collection::vec(arb_cell(), 1..8)) {
        let pairs: Vec<(String, SignalValue)> = cells
            .iter()
            .enumerate()
            .map(|(i, c)| (format!("signal_{i}"), SignalValue::parse(c)))
            .collect();
        let row = Row::from_pairs("D1", pairs);
        let registry = SignalRegistry::default();
        let first = active_signals(&row, &registry);
        let second = active_signals(&row, &registry);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn impossible_rule_never_matches(reputation in arb_cell()) {
        let rule = ClassificationRule::new("impossible", "Impossible")
            .with(Predicate::gt("reputation", 1.1))
            .with(Predicate::lt("reputation", 1.0));
        let row = Row::from_pairs("D1", [("reputation", SignalValue::parse(&reputation))]);
        prop_assert!(!classify(&row, &rule));
    }
}

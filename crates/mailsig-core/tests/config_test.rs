//! Tests for layered configuration.

use std::collections::HashMap;

use mailsig_core::config::{CliOverrides, MailsigConfig};
use mailsig_core::errors::ConfigError;

#[test]
fn defaults_resolve_to_constants() {
    let config = MailsigConfig::default();
    assert_eq!(config.ingest.effective_id_pattern(), r"D\d+");
    assert_eq!(
        config.triage.effective_label_column(),
        "total_components_detected_malicious"
    );
    assert_eq!(config.triage.effective_no_action_label(), 1);
    assert_eq!(config.triage.effective_min_auth_passes(), 2);
    assert_eq!(config.triage.effective_borderline_range(), (0.4, 0.5));
    assert_eq!(config.report.effective_formats(), vec!["text", "csv"]);
    assert_eq!(config.signals.risk_bands.effective_high_max(), 10);
    assert_eq!(config.signals.effective_high_risk().len(), 5);
}

#[test]
fn builtin_positive_states_cover_authentication() {
    let states = MailsigConfig::default().signals.effective_positive_states();
    assert!(states["spf_result"].contains(&"softfail".to_string()));
    assert!(states["ssl_validity_status"].contains(&"expired".to_string()));
}

#[test]
fn toml_sections_parse() {
    let config = MailsigConfig::from_toml(
        r#"
[ingest]
id_column = "Data"

[signals.positive_states]
spf_result = ["fail"]

[[signals.high_risk]]
fragment = "phish"
above = 0.7

[triage]
tiers = ["legitimate-email"]
min_auth_passes = 3

[report]
formats = ["json"]
top_signals = 5
"#,
    )
    .unwrap();
    assert_eq!(config.ingest.id_column.as_deref(), Some("Data"));
    assert_eq!(
        config.signals.effective_positive_states()["spf_result"],
        vec!["fail".to_string()]
    );
    assert_eq!(config.signals.effective_high_risk()[0].fragment, "phish");
    assert_eq!(config.triage.effective_tiers(), vec!["legitimate-email"]);
    assert_eq!(config.report.effective_top_signals(), 5);
}

#[test]
fn unknown_keys_are_ignored() {
    let config = MailsigConfig::from_toml("[ingest]\nfuture_option = true\n").unwrap();
    assert!(config.ingest.id_column.is_none());
}

#[test]
fn validation_rejects_bad_values() {
    assert!(MailsigConfig::from_toml("[ingest]\nid_pattern = \"D(\"\n").is_err());
    assert!(MailsigConfig::from_toml(
        "[signals.risk_bands]\nlow_max = 6\nmedium_max = 5\n"
    )
    .is_err());
    assert!(MailsigConfig::from_toml("[triage]\nborderline_min = 0.6\n").is_err());
    assert!(MailsigConfig::from_toml("[triage]\nmin_auth_passes = 4\n").is_err());
    assert!(MailsigConfig::from_toml("[report]\nformats = [\"pdf\"]\n").is_err());
}

#[test]
fn env_overrides_apply_and_ignore_garbage() {
    let env: HashMap<&str, &str> = [
        ("MAILSIG_ID_COLUMN", "Email"),
        ("MAILSIG_MIN_AUTH_PASSES", "not-a-number"),
        ("MAILSIG_TOP_SIGNALS", "7"),
    ]
    .into_iter()
    .collect();
    let mut config = MailsigConfig::default();
    MailsigConfig::apply_overrides_from(&mut config, |k| env.get(k).map(|v| v.to_string()));
    assert_eq!(config.ingest.id_column.as_deref(), Some("Email"));
    assert_eq!(config.triage.min_auth_passes, None);
    assert_eq!(config.report.top_signals, Some(7));
}

#[test]
fn cli_overrides_win_over_file_values() {
    let mut config = MailsigConfig::from_toml("[ingest]\nid_column = \"Data\"\n").unwrap();
    let cli = CliOverrides {
        id_column: Some("Id".into()),
        formats: vec!["json".into()],
        ..Default::default()
    };
    MailsigConfig::apply_cli_overrides(&mut config, &cli);
    assert_eq!(config.ingest.id_column.as_deref(), Some("Id"));
    assert_eq!(config.report.effective_formats(), vec!["json"]);
}

#[test]
fn project_file_is_merged_from_root() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("mailsig.toml"),
        "[triage]\nlabel_column = \"verdict\"\n",
    )
    .unwrap();
    let config = MailsigConfig::load(dir.path(), None, None).unwrap();
    assert_eq!(config.triage.effective_label_column(), "verdict");
}

#[test]
fn explicit_config_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(MailsigConfig::load(dir.path(), Some(&missing), None).is_err());
}

#[test]
fn config_round_trips_through_toml() {
    let config = MailsigConfig::from_toml("[report]\ntop_numeric = 3\n").unwrap();
    let rendered = config.to_toml().unwrap();
    let reparsed = MailsigConfig::from_toml(&rendered).unwrap();
    assert_eq!(reparsed.report.effective_top_numeric(), 3);
}

#[test]
fn effective_fills_defaults() {
    let config = MailsigConfig::from_toml("[triage]\nborderline_max = 0.45\n").unwrap();
    let effective = config.effective();

    assert_eq!(
        effective.triage.label_column.as_deref(),
        Some("total_components_detected_malicious")
    );
    assert_eq!(effective.triage.borderline_min, Some(0.4));
    assert_eq!(effective.triage.borderline_max, Some(0.45));
    assert_eq!(effective.triage.tiers.len(), 2);
    assert_eq!(effective.ingest.delimiter, Some(','));
    assert_eq!(effective.signals.high_risk.len(), 5);
    assert!(effective.signals.positive_states.contains_key("dmarc_result"));
    assert_eq!(effective.report.formats, vec!["text", "csv"]);
    assert!(effective.ingest.id_column.is_none());

    let rendered = effective.to_toml().unwrap();
    assert!(rendered.contains("borderline_min = 0.4"));
    let reparsed = MailsigConfig::from_toml(&rendered).unwrap();
    assert_eq!(reparsed.triage.effective_borderline_range(), (0.4, 0.45));
}

#[test]
fn non_ascii_delimiter_is_rejected() {
    let err = MailsigConfig::from_toml("[ingest]\ndelimiter = \"§\"\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ValidationFailed { ref field, .. } if field == "ingest.delimiter"
    ));
    assert!(MailsigConfig::from_toml("[ingest]\ndelimiter = \";\"\n").is_ok());
}

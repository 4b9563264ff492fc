//! Tests for the mailsig error handling system.

use std::collections::HashSet;
use std::path::PathBuf;

use mailsig_core::errors::error_code;
use mailsig_core::errors::*;

#[test]
fn every_error_has_a_code() {
    let errors: Vec<Box<dyn Fn() -> String>> = vec![
        Box::new(|| {
            IngestError::FileNotFound {
                path: PathBuf::from("x.csv"),
            }
            .coded_string()
        }),
        Box::new(|| RuleError::EmptyRule("r".into()).coded_string()),
        Box::new(|| {
            ReportError::RenderFailed {
                format: "csv".into(),
                message: "boom".into(),
            }
            .coded_string()
        }),
        Box::new(|| {
            ConfigError::FileNotFound {
                path: "/tmp".into(),
            }
            .coded_string()
        }),
    ];
    for render in errors {
        let s = render();
        assert!(s.starts_with('['), "missing code prefix: {s}");
    }
}

#[test]
fn ingest_codes_distinguish_missing_file_from_malformed_input() {
    let missing = IngestError::FileNotFound {
        path: PathBuf::from("a.csv"),
    };
    let malformed = IngestError::Malformed {
        path: PathBuf::from("a.csv"),
        record: 3,
        message: "ragged".into(),
    };
    assert_eq!(missing.error_code(), error_code::FILE_NOT_FOUND);
    assert_eq!(malformed.error_code(), error_code::MALFORMED_INPUT);
}

#[test]
fn from_conversions_preserve_subsystem_code() {
    let err: TriageError = RuleError::UnknownRule("nope".into()).into();
    assert!(matches!(err, TriageError::Rule(RuleError::UnknownRule(_))));
    assert_eq!(err.error_code(), error_code::UNKNOWN_RULE);

    let err: TriageError = ConfigError::ValidationFailed {
        field: "f".into(),
        message: "m".into(),
    }
    .into();
    assert_eq!(err.error_code(), error_code::CONFIG_ERROR);
}

#[test]
fn error_codes_are_unique_per_constant() {
    let codes = [
        error_code::INGEST_ERROR,
        error_code::FILE_NOT_FOUND,
        error_code::MALFORMED_INPUT,
        error_code::SELECTION_ERROR,
        error_code::RULE_ERROR,
        error_code::UNKNOWN_RULE,
        error_code::REPORT_ERROR,
        error_code::CONFIG_ERROR,
    ];
    let unique: HashSet<_> = codes.iter().collect();
    assert_eq!(unique.len(), codes.len());
}

#[test]
fn triage_result_collects_diagnostics() {
    let mut result: TriageResult<Vec<u32>> = TriageResult::new(vec![1, 2]);
    assert!(result.is_clean());
    result.add_diagnostic(Diagnostic::new("selection", "no rows matched"));
    assert_eq!(result.diagnostic_count(), 1);
    assert_eq!(
        result.diagnostics[0].to_string(),
        "selection: no rows matched"
    );
}

// Single source of truth for all default values.

// --- Ingest ---
pub const DEFAULT_ID_PATTERN: &str = r"D\d+";
pub const ID_COLUMN_HINTS: &[&str] = &["id", "data"];
pub const ID_SNIFF_ROWS: usize = 10;
pub const DIAGNOSTIC_SAMPLE_SIZE: usize = 10;
/// Most ids a single `--emails` selection may expand to.
pub const MAX_SELECTION_SPAN: usize = 100_000;

// --- Signals ---
pub const AUTH_SIGNALS: &[&str] = &["spf_result", "dkim_result", "dmarc_result"];
pub const AUTH_FAILURE_STATES: &[&str] = &["fail", "softfail", "permerror", "temperror"];
pub const SSL_SIGNAL: &str = "ssl_validity_status";
pub const SSL_FAILURE_STATES: &[&str] = &["expired", "invalid", "self_signed", "revoked"];

/// Default high-risk indicators: (signal name fragment, strict lower bound).
pub const DEFAULT_HIGH_RISK: &[(&str, f64)] = &[
    ("malicious", 0.0),
    ("suspicious", 0.5),
    ("behavioral_sandbox_score", 0.2),
    ("exfiltration", 0.5),
    ("temp_email", 0.5),
];

// --- Risk bands (inclusive upper bounds on active-signal count) ---
pub const DEFAULT_LOW_MAX: usize = 2;
pub const DEFAULT_MEDIUM_MAX: usize = 5;
pub const DEFAULT_HIGH_MAX: usize = 10;

// --- Triage ---
pub const DEFAULT_LABEL_COLUMN: &str = "total_components_detected_malicious";
pub const DEFAULT_NO_ACTION_LABEL: i64 = 1;
pub const DEFAULT_MIN_AUTH_PASSES: usize = 2;
pub const DEFAULT_BORDERLINE_SIGNAL: &str = "sender_domain_reputation_score";
pub const DEFAULT_BORDERLINE_MIN: f64 = 0.4;
pub const DEFAULT_BORDERLINE_MAX: f64 = 0.5;
pub const DEFAULT_TIERS: &[&str] = &["high-confidence-no-action", "medium-confidence-no-action"];
pub const DEFAULT_SUMMARY_SIGNALS: &[&str] = &[
    "sender_domain_reputation_score",
    "content_spam_score",
    "request_type",
    "spf_result",
    "dkim_result",
];

// --- Report ---
pub const DEFAULT_TOP_SIGNALS: usize = 20;
pub const DEFAULT_TOP_NUMERIC: usize = 5;
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const HIGH_RISK_DETAIL_LIMIT: usize = 3;

// --- Config files ---
pub const PROJECT_CONFIG_FILE: &str = "mailsig.toml";
pub const USER_CONFIG_DIR: &str = ".mailsig";
pub const USER_CONFIG_FILE: &str = "config.toml";
pub const LOG_ENV_VAR: &str = "MAILSIG_LOG";
pub const DEFAULT_LOG_FILTER: &str = "mailsig=info";

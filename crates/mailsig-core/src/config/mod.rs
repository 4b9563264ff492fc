//! Configuration system for mailsig.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod ingest_config;
pub mod mailsig_config;
pub mod report_config;
pub mod rules_config;
pub mod signals_config;
pub mod triage_config;

pub use ingest_config::IngestConfig;
pub use mailsig_config::{CliOverrides, MailsigConfig};
pub use report_config::ReportConfig;
pub use rules_config::RulesConfig;
pub use signals_config::{HighRiskThreshold, RiskBands, SignalsConfig};
pub use triage_config::TriageConfig;

//! Top-level mailsig configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{IngestConfig, ReportConfig, RulesConfig, SignalsConfig, TriageConfig};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`MAILSIG_*`)
/// 3. Project config (`mailsig.toml` in the working directory, or `--config`)
/// 4. User config (`~/.mailsig/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MailsigConfig {
    pub ingest: IngestConfig,
    pub signals: SignalsConfig,
    pub rules: RulesConfig,
    pub triage: TriageConfig,
    pub report: ReportConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub id_column: Option<String>,
    pub rules_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub formats: Vec<String>,
}

impl MailsigConfig {
    /// Load configuration with layered resolution.
    ///
    /// `explicit` replaces the project layer and must exist.
    pub fn load(
        root: &Path,
        explicit: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                Self::merge_toml_file(&mut config, path)?;
            }
            None => {
                let project_config_path = root.join(constants::PROJECT_CONFIG_FILE);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &MailsigConfig) -> Result<(), ConfigError> {
        if let Some(delimiter) = config.ingest.delimiter {
            if !delimiter.is_ascii() {
                return Err(ConfigError::ValidationFailed {
                    field: "ingest.delimiter".to_string(),
                    message: format!("'{delimiter}' is not a single-byte ASCII character"),
                });
            }
        }

        regex::Regex::new(config.ingest.effective_id_pattern()).map_err(|e| {
            ConfigError::ValidationFailed {
                field: "ingest.id_pattern".to_string(),
                message: e.to_string(),
            }
        })?;

        let bands = &config.signals.risk_bands;
        if !(bands.effective_low_max() <= bands.effective_medium_max()
            && bands.effective_medium_max() <= bands.effective_high_max())
        {
            return Err(ConfigError::ValidationFailed {
                field: "signals.risk_bands".to_string(),
                message: "bands must be non-decreasing (low <= medium <= high)".to_string(),
            });
        }

        for threshold in &config.signals.high_risk {
            if threshold.fragment.trim().is_empty() || !threshold.above.is_finite() {
                return Err(ConfigError::ValidationFailed {
                    field: "signals.high_risk".to_string(),
                    message: format!(
                        "invalid indicator '{}' > {}",
                        threshold.fragment, threshold.above
                    ),
                });
            }
        }

        let (min, max) = config.triage.effective_borderline_range();
        if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) || min > max {
            return Err(ConfigError::ValidationFailed {
                field: "triage.borderline_min/borderline_max".to_string(),
                message: "must satisfy 0.0 <= min <= max <= 1.0".to_string(),
            });
        }

        if config.triage.effective_min_auth_passes() > constants::AUTH_SIGNALS.len() {
            return Err(ConfigError::ValidationFailed {
                field: "triage.min_auth_passes".to_string(),
                message: format!("must be at most {}", constants::AUTH_SIGNALS.len()),
            });
        }

        for format in &config.report.formats {
            if !matches!(format.as_str(), "text" | "csv" | "json") {
                return Err(ConfigError::ValidationFailed {
                    field: "report.formats".to_string(),
                    message: format!("unknown format '{format}'"),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.mailsig/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| {
            h.join(constants::USER_CONFIG_DIR)
                .join(constants::USER_CONFIG_FILE)
        })
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut MailsigConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: MailsigConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it sets a value.
    pub fn merge(base: &mut MailsigConfig, other: &MailsigConfig) {
        // Ingest
        if other.ingest.id_column.is_some() {
            base.ingest.id_column = other.ingest.id_column.clone();
        }
        if other.ingest.id_pattern.is_some() {
            base.ingest.id_pattern = other.ingest.id_pattern.clone();
        }
        if other.ingest.delimiter.is_some() {
            base.ingest.delimiter = other.ingest.delimiter;
        }

        // Signals
        for (signal, states) in &other.signals.positive_states {
            base.signals
                .positive_states
                .insert(signal.clone(), states.clone());
        }
        if !other.signals.high_risk.is_empty() {
            base.signals.high_risk = other.signals.high_risk.clone();
        }
        let bands = &other.signals.risk_bands;
        if bands.low_max.is_some() {
            base.signals.risk_bands.low_max = bands.low_max;
        }
        if bands.medium_max.is_some() {
            base.signals.risk_bands.medium_max = bands.medium_max;
        }
        if bands.high_max.is_some() {
            base.signals.risk_bands.high_max = bands.high_max;
        }

        // Rules
        if other.rules.path.is_some() {
            base.rules.path = other.rules.path.clone();
        }
        if !other.rules.disabled.is_empty() {
            base.rules.disabled = other.rules.disabled.clone();
        }

        // Triage
        if !other.triage.tiers.is_empty() {
            base.triage.tiers = other.triage.tiers.clone();
        }
        if other.triage.label_column.is_some() {
            base.triage.label_column = other.triage.label_column.clone();
        }
        if other.triage.no_action_label.is_some() {
            base.triage.no_action_label = other.triage.no_action_label;
        }
        if other.triage.min_auth_passes.is_some() {
            base.triage.min_auth_passes = other.triage.min_auth_passes;
        }
        if other.triage.borderline_signal.is_some() {
            base.triage.borderline_signal = other.triage.borderline_signal.clone();
        }
        if other.triage.borderline_min.is_some() {
            base.triage.borderline_min = other.triage.borderline_min;
        }
        if other.triage.borderline_max.is_some() {
            base.triage.borderline_max = other.triage.borderline_max;
        }
        if !other.triage.summary_signals.is_empty() {
            base.triage.summary_signals = other.triage.summary_signals.clone();
        }

        // Report
        if other.report.output_dir.is_some() {
            base.report.output_dir = other.report.output_dir.clone();
        }
        if !other.report.formats.is_empty() {
            base.report.formats = other.report.formats.clone();
        }
        if other.report.top_signals.is_some() {
            base.report.top_signals = other.report.top_signals;
        }
        if other.report.top_numeric.is_some() {
            base.report.top_numeric = other.report.top_numeric;
        }
        if other.report.source_name.is_some() {
            base.report.source_name = other.report.source_name.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `MAILSIG_ID_COLUMN`, `MAILSIG_RULES_PATH`, etc.
    fn apply_env_overrides(config: &mut MailsigConfig) {
        Self::apply_overrides_from(config, |key| std::env::var(key).ok());
    }

    /// Apply `MAILSIG_*` overrides read through `lookup`.
    pub fn apply_overrides_from<F>(config: &mut MailsigConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("MAILSIG_ID_COLUMN") {
            config.ingest.id_column = Some(val);
        }
        if let Some(val) = lookup("MAILSIG_RULES_PATH") {
            config.rules.path = Some(PathBuf::from(val));
        }
        if let Some(val) = lookup("MAILSIG_OUTPUT_DIR") {
            config.report.output_dir = Some(PathBuf::from(val));
        }
        if let Some(val) = lookup("MAILSIG_LABEL_COLUMN") {
            config.triage.label_column = Some(val);
        }
        if let Some(val) = lookup("MAILSIG_MIN_AUTH_PASSES") {
            if let Ok(v) = val.parse::<usize>() {
                config.triage.min_auth_passes = Some(v);
            }
        }
        if let Some(val) = lookup("MAILSIG_TOP_SIGNALS") {
            if let Ok(v) = val.parse::<usize>() {
                config.report.top_signals = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    pub fn apply_cli_overrides(config: &mut MailsigConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.id_column {
            config.ingest.id_column = Some(v.clone());
        }
        if let Some(ref v) = cli.rules_path {
            config.rules.path = Some(v.clone());
        }
        if let Some(ref v) = cli.output_dir {
            config.report.output_dir = Some(v.clone());
        }
        if !cli.formats.is_empty() {
            config.report.formats = cli.formats.clone();
        }
    }

    /// The config with every defaulted value filled in, as the commands see it.
    ///
    /// `ingest.id_column`, `rules.path` and `report.source_name` stay unset
    /// when unset here: their absence selects auto-detection.
    pub fn effective(&self) -> MailsigConfig {
        let mut config = self.clone();

        config.ingest.id_pattern = Some(self.ingest.effective_id_pattern().to_string());
        config.ingest.delimiter = Some(char::from(self.ingest.effective_delimiter()));

        config.signals.positive_states = self.signals.effective_positive_states();
        config.signals.high_risk = self.signals.effective_high_risk();
        let bands = &self.signals.risk_bands;
        config.signals.risk_bands.low_max = Some(bands.effective_low_max());
        config.signals.risk_bands.medium_max = Some(bands.effective_medium_max());
        config.signals.risk_bands.high_max = Some(bands.effective_high_max());

        let triage = &self.triage;
        let (min, max) = triage.effective_borderline_range();
        config.triage.tiers = triage.effective_tiers();
        config.triage.label_column = Some(triage.effective_label_column().to_string());
        config.triage.no_action_label = Some(triage.effective_no_action_label());
        config.triage.min_auth_passes = Some(triage.effective_min_auth_passes());
        config.triage.borderline_signal = Some(triage.effective_borderline_signal().to_string());
        config.triage.borderline_min = Some(min);
        config.triage.borderline_max = Some(max);
        config.triage.summary_signals = triage.effective_summary_signals();

        let report = &self.report;
        config.report.output_dir = Some(report.effective_output_dir().to_path_buf());
        config.report.formats = report.effective_formats();
        config.report.top_signals = Some(report.effective_top_signals());
        config.report.top_numeric = Some(report.effective_top_numeric());

        config
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

//! Shared plumbing: config, rules, and input loading for the subcommands.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Args;
use mailsig_analysis::ingest::{read_batch, select, Batch, Selection};
use mailsig_analysis::rules::RuleSet;
use mailsig_core::config::{CliOverrides, MailsigConfig};
use mailsig_core::errors::Diagnostic;
use mailsig_core::types::EmailId;

/// Flags every subcommand sees.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
}

/// Input file plus an optional id selection.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Signal CSV to read
    #[arg(short, long, value_name = "CSV")]
    pub input: PathBuf,

    /// Emails to keep, e.g. `D61-D65` or `D1,D7,D9` (default: all rows)
    #[arg(long, value_name = "SELECTION")]
    pub ids: Option<String>,

    /// Id column name (default: auto-detect)
    #[arg(long, value_name = "NAME")]
    pub id_column: Option<String>,
}

impl InputArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            id_column: self.id_column.clone(),
            ..Default::default()
        }
    }
}

/// Resolve the layered config with `overrides` on top.
pub fn load_config(global: &GlobalArgs, overrides: &CliOverrides) -> anyhow::Result<MailsigConfig> {
    let root = std::env::current_dir().context("cannot resolve working directory")?;
    let config = MailsigConfig::load(&root, global.config.as_deref(), Some(overrides))?;
    Ok(config)
}

/// Built-in rules merged with the configured rules file.
pub fn load_rules(config: &MailsigConfig) -> anyhow::Result<RuleSet> {
    Ok(RuleSet::load(&config.rules)?)
}

/// The rows a command works on: the whole batch, or the `--ids` selection.
pub struct Loaded {
    pub batch: Batch,
    pub diagnostics: Vec<Diagnostic>,
    pub strategy: Option<&'static str>,
}

pub fn load_input(input: &InputArgs, config: &MailsigConfig) -> anyhow::Result<Loaded> {
    let batch = read_batch(&input.input, &config.ingest)?;
    let Some(selection) = input.ids.as_deref() else {
        return Ok(Loaded {
            batch,
            diagnostics: Vec::new(),
            strategy: None,
        });
    };
    let ids = EmailId::parse_selection(selection)?;
    let Selection {
        batch,
        strategy,
        diagnostics,
        ..
    } = select(&batch, &ids);
    Ok(Loaded {
        batch,
        diagnostics,
        strategy: Some(strategy.name()),
    })
}

/// Print diagnostics on stderr.
pub fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("warning: {diagnostic}");
    }
}

/// Source name shown in report headers.
pub fn source_name(config: &MailsigConfig, batch: &Batch) -> String {
    config
        .report
        .source_name
        .clone()
        .unwrap_or_else(|| batch.source_name())
}

/// `dir/name`, or `name` when `dir` is the current directory.
pub fn output_path(dir: &Path, name: &str) -> PathBuf {
    if dir == Path::new(".") {
        PathBuf::from(name)
    } else {
        dir.join(name)
    }
}

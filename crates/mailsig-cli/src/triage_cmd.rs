//! `mailsig triage`: No-Action triage report.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use mailsig_analysis::report::{write_file, TriageReporter};
use mailsig_analysis::triage::TriageEngine;
use mailsig_core::config::CliOverrides;
use mailsig_core::tracing::events;

use crate::context::{self, GlobalArgs, InputArgs};
use crate::exit_codes;

#[derive(Debug, Args)]
pub struct TriageArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// TOML rules file merged over the built-in rules
    #[arg(long, value_name = "TOML")]
    pub rules: Option<PathBuf>,

    /// Also write the report to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(global: &GlobalArgs, args: TriageArgs) -> anyhow::Result<i32> {
    let overrides = CliOverrides {
        rules_path: args.rules.clone(),
        ..args.input.overrides()
    };
    let config = context::load_config(global, &overrides)?;
    let rules = context::load_rules(&config)?;
    let loaded = context::load_input(&args.input, &config)?;
    context::report_diagnostics(&loaded.diagnostics);

    if loaded.batch.is_empty() {
        eprintln!("No rows to triage.");
        return Ok(exit_codes::EMPTY_RESULT);
    }

    let result = TriageEngine::new(&rules, &config.triage).run(loaded.batch.rows())?;
    context::report_diagnostics(&result.diagnostics);

    let text = TriageReporter.generate(&result.data)?;
    if let Some(path) = args.output.as_deref() {
        write_file(path, &text).with_context(|| format!("writing {}", path.display()))?;
        events::report_written(&path.display().to_string(), "triage");
        eprintln!("Wrote {}", path.display());
    }
    print!("{text}");
    Ok(exit_codes::SUCCESS)
}

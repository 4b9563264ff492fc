//! `mailsig report`: analyze a batch and write reports.

use std::path::PathBuf;

use clap::Args;
use mailsig_analysis::analysis::Analyzer;
use mailsig_analysis::report::{
    available_formats, create_reporter, report_stem, write_report, TextReporter,
};
use mailsig_analysis::report::Reporter as _;
use mailsig_core::config::CliOverrides;
use mailsig_core::errors::ConfigError;

use crate::context::{self, GlobalArgs, InputArgs};
use crate::exit_codes;

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Report format; repeatable (default: text and csv)
    #[arg(short, long = "format", value_name = "FORMAT", value_parser = ["text", "csv", "json"])]
    pub formats: Vec<String>,

    /// Directory the reports are written into
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Do not print the text report
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(global: &GlobalArgs, args: ReportArgs) -> anyhow::Result<i32> {
    let overrides = CliOverrides {
        output_dir: args.output_dir.clone(),
        formats: args.formats.clone(),
        ..args.input.overrides()
    };
    let config = context::load_config(global, &overrides)?;
    let loaded = context::load_input(&args.input, &config)?;
    context::report_diagnostics(&loaded.diagnostics);

    if loaded.batch.is_empty() {
        eprintln!("No rows to analyze.");
        return Ok(exit_codes::EMPTY_RESULT);
    }

    let analysis = Analyzer::from_config(&config)
        .analyze(&context::source_name(&config, &loaded.batch), loaded.batch.rows());
    let stem = report_stem(&analysis);
    let dir = config.report.effective_output_dir();

    for format in config.report.effective_formats() {
        let reporter = create_reporter(&format).ok_or_else(|| ConfigError::ValidationFailed {
            field: "report.formats".to_string(),
            message: format!(
                "unknown format '{format}', expected one of: {}",
                available_formats().join(", ")
            ),
        })?;
        let path = write_report(dir, &stem, reporter.as_ref(), &analysis)?;
        eprintln!("Wrote {}", path.display());
    }

    if !args.quiet {
        print!("{}", TextReporter.generate(&analysis)?);
    }
    Ok(exit_codes::SUCCESS)
}

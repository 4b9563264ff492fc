//! `mailsig extract`: write the selected rows to a new CSV.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use mailsig_analysis::ingest::write_batch;
use mailsig_analysis::report::file_label;

use crate::context::{self, GlobalArgs, InputArgs};
use crate::exit_codes;

#[derive(Debug, Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output CSV (default: `<first>_<last>_extracted.csv` in the output dir)
    #[arg(short, long, value_name = "CSV")]
    pub output: Option<PathBuf>,
}

pub fn run(global: &GlobalArgs, args: ExtractArgs) -> anyhow::Result<i32> {
    if args.input.ids.is_none() {
        anyhow::bail!(mailsig_core::errors::IngestError::InvalidSelection {
            input: String::new(),
            message: "extract needs --ids".to_string(),
        });
    }
    let config = context::load_config(global, &args.input.overrides())?;
    let loaded = context::load_input(&args.input, &config)?;
    context::report_diagnostics(&loaded.diagnostics);

    let rows = loaded.batch.rows();
    if rows.is_empty() {
        eprintln!("No rows selected.");
        return Ok(exit_codes::EMPTY_RESULT);
    }

    let output = args.output.unwrap_or_else(|| {
        let name = match (rows.first(), rows.last()) {
            (Some(first), Some(last)) if rows.len() > 1 => {
                format!(
                    "{}_{}_extracted.csv",
                    file_label(first.label()),
                    file_label(last.label())
                )
            }
            _ => format!("{}_extracted.csv", file_label(rows[0].label())),
        };
        context::output_path(config.report.effective_output_dir(), &name)
    });

    write_batch(&output, &loaded.batch)
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "Extracted {} rows ({} signals) via {} to {}",
        rows.len(),
        loaded.batch.schema().signal_count(),
        loaded.strategy.unwrap_or("id_column"),
        output.display()
    );
    let labels: Vec<&str> = rows.iter().map(|r| r.label()).collect();
    println!("{}", labels.join(", "));
    Ok(exit_codes::SUCCESS)
}

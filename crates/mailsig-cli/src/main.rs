//! `mailsig`: email detection-signal triage from the command line.
//!
//! ## Exit Codes
//!
//! - 0: Success
//! - 1: Empty result (no rows selected, no rows matched)
//! - 2: Configuration or rule error
//! - 3: Input or output error

mod classify_cmd;
mod config_cmd;
mod context;
mod extract_cmd;
mod report_cmd;
mod rules_cmd;
mod triage_cmd;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mailsig_core::errors::{ConfigError, IngestError, ReportError, RuleError, TriageError};
use mailsig_core::MailsigErrorCode;

/// Exit codes shared by every subcommand.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const EMPTY_RESULT: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
    pub const INPUT_ERROR: i32 = 3;
}

/// Email detection-signal triage.
#[derive(Debug, Parser)]
#[command(name = "mailsig", version, about)]
pub struct Cli {
    /// Config file replacing ./mailsig.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Debug logging on stderr (MAILSIG_LOG still wins)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Select rows by email id and write them to a new CSV
    Extract(extract_cmd::ExtractArgs),

    /// Analyze a batch and write text/CSV/JSON reports
    Report(report_cmd::ReportArgs),

    /// List the rows matching one classification rule
    Classify(classify_cmd::ClassifyArgs),

    /// Run the No-Action triage over a batch
    Triage(triage_cmd::TriageArgs),

    /// List the effective classification rules
    Rules(rules_cmd::RulesArgs),

    /// Inspect the effective configuration
    Config(config_cmd::ConfigArgs),
}

impl Cli {
    pub fn run(self) -> anyhow::Result<i32> {
        let global = context::GlobalArgs {
            config: self.config,
        };
        match self.command {
            Command::Extract(args) => extract_cmd::run(&global, args),
            Command::Report(args) => report_cmd::run(&global, args),
            Command::Classify(args) => classify_cmd::run(&global, args),
            Command::Triage(args) => triage_cmd::run(&global, args),
            Command::Rules(args) => rules_cmd::run(&global, args),
            Command::Config(args) => config_cmd::run(&global, args),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let default_filter = if cli.verbose {
        "mailsig=debug"
    } else {
        mailsig_core::constants::DEFAULT_LOG_FILTER
    };
    mailsig_core::tracing::init_tracing_with_default(default_filter);

    let code = match cli.run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {}", describe(&err));
            exit_code_for(&err)
        }
    };
    std::process::exit(code);
}

/// `[CODE] message` for mailsig errors, with any added context in front.
fn describe(err: &anyhow::Error) -> String {
    match coded(err) {
        Some((code, message)) if err.to_string() == message => format!("[{code}] {message}"),
        Some((code, message)) => format!("{err}: [{code}] {message}"),
        None => format!("{err:#}"),
    }
}

fn coded(err: &anyhow::Error) -> Option<(&'static str, String)> {
    fn pair<E: MailsigErrorCode + std::fmt::Display>(e: &E) -> (&'static str, String) {
        (e.error_code(), e.to_string())
    }
    if let Some(e) = err.downcast_ref::<TriageError>() {
        return Some(pair(e));
    }
    if let Some(e) = err.downcast_ref::<IngestError>() {
        return Some(pair(e));
    }
    if let Some(e) = err.downcast_ref::<RuleError>() {
        return Some(pair(e));
    }
    if let Some(e) = err.downcast_ref::<ConfigError>() {
        return Some(pair(e));
    }
    err.downcast_ref::<ReportError>().map(pair)
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<TriageError>() {
        return match e {
            TriageError::Rule(_) | TriageError::Config(_) => exit_codes::CONFIG_ERROR,
            TriageError::Ingest(_) | TriageError::Report(_) => exit_codes::INPUT_ERROR,
        };
    }
    if err.downcast_ref::<RuleError>().is_some() || err.downcast_ref::<ConfigError>().is_some() {
        exit_codes::CONFIG_ERROR
    } else {
        exit_codes::INPUT_ERROR
    }
}

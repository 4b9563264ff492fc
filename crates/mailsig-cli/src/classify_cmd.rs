//! `mailsig classify`: list the rows matching one rule.

use std::path::PathBuf;

use clap::Args;
use mailsig_analysis::rules::{evaluate, PredicateOutcome};
use mailsig_core::config::CliOverrides;
use mailsig_core::tracing::events;

use crate::context::{self, GlobalArgs, InputArgs};
use crate::exit_codes;

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Rule id, e.g. `high-confidence-no-action`
    #[arg(short, long, value_name = "ID")]
    pub rule: String,

    /// TOML rules file merged over the built-in rules
    #[arg(long, value_name = "TOML")]
    pub rules: Option<PathBuf>,

    /// Explain why each non-matching row failed
    #[arg(long)]
    pub explain: bool,
}

pub fn run(global: &GlobalArgs, args: ClassifyArgs) -> anyhow::Result<i32> {
    let overrides = CliOverrides {
        rules_path: args.rules.clone(),
        ..args.input.overrides()
    };
    let config = context::load_config(global, &overrides)?;
    let rules = context::load_rules(&config)?;
    let rule = rules.require(&args.rule)?;
    let loaded = context::load_input(&args.input, &config)?;
    context::report_diagnostics(&loaded.diagnostics);

    let rows = loaded.batch.rows();
    let mut matched = 0usize;
    for row in rows {
        let verdict = evaluate(row, rule);
        if verdict.matched {
            matched += 1;
            println!("{}", row.label());
            continue;
        }
        if let Some(predicate) = verdict.first_unevaluable(rule) {
            events::row_skipped(row.label(), &rule.id, &predicate.signal);
        }
        if args.explain {
            let reasons: Vec<String> = verdict
                .failures(rule)
                .map(|(predicate, outcome)| match outcome {
                    PredicateOutcome::Missing => format!("{} (missing)", predicate.signal),
                    PredicateOutcome::Unparseable => format!("{} (unparseable)", predicate.signal),
                    _ => {
                        let actual = row
                            .get(&predicate.signal)
                            .map(ToString::to_string)
                            .unwrap_or_default();
                        format!("{predicate} (was {actual})")
                    }
                })
                .collect();
            eprintln!("{}: no match: {}", row.label(), reasons.join("; "));
        }
    }
    events::rule_evaluated(&rule.id, rows.len(), matched);

    eprintln!("{matched}/{} rows match {}", rows.len(), rule.id);
    Ok(if matched == 0 {
        exit_codes::EMPTY_RESULT
    } else {
        exit_codes::SUCCESS
    })
}

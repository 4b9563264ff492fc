//! `mailsig rules`: list the effective rule set.

use std::path::PathBuf;

use clap::Args;
use mailsig_core::config::CliOverrides;

use crate::context::{self, GlobalArgs};
use crate::exit_codes;

#[derive(Debug, Args)]
pub struct RulesArgs {
    /// TOML rules file merged over the built-in rules
    #[arg(long, value_name = "TOML")]
    pub rules: Option<PathBuf>,

    /// Print only the rule ids
    #[arg(long)]
    pub ids_only: bool,
}

pub fn run(global: &GlobalArgs, args: RulesArgs) -> anyhow::Result<i32> {
    let overrides = CliOverrides {
        rules_path: args.rules,
        ..Default::default()
    };
    let config = context::load_config(global, &overrides)?;
    let rules = context::load_rules(&config)?;

    for rule in &rules {
        if args.ids_only {
            println!("{}", rule.id);
            continue;
        }
        println!("{} - {} ({} predicates)", rule.id, rule.name, rule.predicates.len());
        if let Some(description) = &rule.description {
            println!("  {description}");
        }
        for predicate in &rule.predicates {
            println!("    {predicate}");
        }
    }
    Ok(if rules.is_empty() {
        exit_codes::EMPTY_RESULT
    } else {
        exit_codes::SUCCESS
    })
}

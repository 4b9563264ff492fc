//! `mailsig config`: inspect the effective configuration.

use clap::Args;
use mailsig_core::config::CliOverrides;

use crate::context::{self, GlobalArgs};
use crate::exit_codes;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Print the effective configuration as TOML
    #[arg(long)]
    pub show: bool,
}

pub fn run(global: &GlobalArgs, args: ConfigArgs) -> anyhow::Result<i32> {
    let config = context::load_config(global, &CliOverrides::default())?;
    if args.show {
        print!("{}", config.effective().to_toml()?);
    } else {
        println!("Configuration is valid. Use --show to print it.");
    }
    Ok(exit_codes::SUCCESS)
}

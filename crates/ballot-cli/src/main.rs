//! Ballot CLI - local host for a weighted, delegable ballot.
//!
//! Each invocation applies at most one call to a ballot kept in a JSON
//! state file.

mod commands;
mod config;
mod output;
mod state;
mod telemetry;

use ballot_ledger::BallotError;
use clap::Parser;

use crate::config::CliConfig;

fn main() {
    let cli = commands::Cli::parse();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<BallotError>() {
            Some(err) => output::print_error(&format!("{} [{}]", err, err.code())),
            None => output::print_error(&format!("Error: {:#}", e)),
        }
        std::process::exit(1);
    }
}

fn run(cli: commands::Cli) -> anyhow::Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => CliConfig::config_path()?,
    };
    let config = CliConfig::load_from(&config_path)?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    telemetry::init_telemetry(level, cli.log_json)?;

    commands::execute(cli, config, &config_path)
}

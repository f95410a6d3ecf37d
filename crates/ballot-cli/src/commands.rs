//! CLI command implementations.
//!
//! Every state-changing command loads the ballot, applies one call as the
//! given caller and writes the ballot back.

use ballot_ledger::{Address, Call, ProposalId, VotingLedger};
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;
use std::path::{Path, PathBuf};

use crate::config::CliConfig;
use crate::output::*;
use crate::state::StateFile;

/// Main CLI.
#[derive(Parser)]
#[command(name = "ballot")]
#[command(about = "Weighted, delegable voting on a fixed list of proposals")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Ballot state file (overrides config)
    #[arg(short, long, global = true, env = "BALLOT_STATE")]
    pub state: Option<PathBuf>,

    /// Config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new ballot
    Init {
        /// Proposal names, in index order
        #[arg(required = true)]
        names: Vec<String>,
        /// Chairperson (defaults to the caller)
        #[arg(long)]
        chairperson: Option<String>,
        /// Replace an existing ballot
        #[arg(long)]
        force: bool,
    },

    /// Give an address the right to vote
    GiveRight {
        /// Voter address
        voter: String,
        /// Caller (must be the chairperson)
        #[arg(long)]
        from: Option<String>,
    },

    /// Delegate your vote
    Delegate {
        /// Delegate address
        to: String,
        /// Caller
        #[arg(long)]
        from: Option<String>,
    },

    /// Vote for a proposal
    Vote {
        /// Proposal index
        proposal: ProposalId,
        /// Caller
        #[arg(long)]
        from: Option<String>,
    },

    /// Show the winning proposal
    Winner,

    /// List proposals
    Proposals,

    /// Show one proposal
    Proposal {
        /// Proposal index
        index: ProposalId,
    },

    /// Show a voter record
    Voter {
        /// Voter address
        address: String,
    },

    /// Show the chairperson
    Chairperson,

    /// List development accounts
    Accounts {
        /// Number of accounts
        #[arg(short, long, default_value_t = 10)]
        count: u32,
    },

    /// Configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Config commands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current config
    Show,
    /// Get a config value
    Get {
        /// Key
        key: String,
    },
    /// Set config value
    Set {
        /// Key
        key: String,
        /// Value
        value: String,
    },
    /// Reset to defaults
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

/// Execute a parsed command line.
pub fn execute(cli: Cli, config: CliConfig, config_path: &Path) -> anyhow::Result<()> {
    let state = StateFile::new(cli.state.clone().unwrap_or_else(|| config.state_file.clone()));

    match cli.command {
        Commands::Init {
            names,
            chairperson,
            force,
        } => {
            if state.exists() && !force {
                anyhow::bail!(
                    "Ballot already exists at '{}' (use --force to replace it)",
                    state.path().display()
                );
            }
            let chairperson = resolve_caller(chairperson.as_deref(), &config)?;
            let ledger = VotingLedger::from_names(chairperson, &names)?;
            state.save(&ledger)?;

            print_success(&format!(
                "Created ballot with {} proposals at {}",
                ledger.proposal_count(),
                state.path().display()
            ));
            print_info(&format!("Chairperson: {}", format_address(&chairperson)));
        }

        Commands::GiveRight { voter, from } => {
            let caller = resolve_caller(from.as_deref(), &config)?;
            let voter = parse_account(&voter)?;
            apply(&state, caller, Call::GiveRightToVote { voter })?;
        }

        Commands::Delegate { to, from } => {
            let caller = resolve_caller(from.as_deref(), &config)?;
            let to = parse_account(&to)?;
            apply(&state, caller, Call::Delegate { to })?;
        }

        Commands::Vote { proposal, from } => {
            let caller = resolve_caller(from.as_deref(), &config)?;
            apply(&state, caller, Call::Vote { proposal })?;
        }

        Commands::Winner => print_winner(&state.load()?),

        Commands::Proposals => print_proposal_table(&state.load()?),

        Commands::Proposal { index } => {
            let ledger = state.load()?;
            let proposal = ledger.proposal(index).ok_or_else(|| {
                anyhow::anyhow!(
                    "No proposal #{} (ballot has {})",
                    index,
                    ledger.proposal_count()
                )
            })?;
            print_proposal(index, proposal);
        }

        Commands::Voter { address } => {
            let ledger = state.load()?;
            let address = parse_account(&address)?;
            print_voter(&address, &ledger.voter(&address));
        }

        Commands::Chairperson => {
            let ledger = state.load()?;
            println!("{}", format_address(&ledger.chairperson()));
        }

        Commands::Accounts { count } => {
            let accounts: Vec<(u32, Address)> =
                (0..count).map(|n| (n, Address::dev_account(n))).collect();
            print_account_table(&accounts);
        }

        Commands::Config(cmd) => execute_config(cmd, config, config_path)?,
    }

    Ok(())
}

/// Load, apply one call, persist.
fn apply(state: &StateFile, caller: Address, call: Call) -> anyhow::Result<()> {
    let mut ledger = state.load()?;
    let event = ledger.execute(caller, call)?;
    state.save(&ledger)?;

    print_success(&describe_event(&event));
    Ok(())
}

fn execute_config(cmd: ConfigCommands, mut config: CliConfig, path: &Path) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("{}", "CLI Configuration".bold());
            println!("{}", "=".repeat(50));
            println!("Config file:  {}", path.display());
            println!("State file:   {}", config.state_file.display().to_string().bright_cyan());
            println!(
                "Default acc:  {}",
                config.default_account.as_deref().unwrap_or("#0").bright_green()
            );
            println!("Log level:    {}", config.log_level.bright_yellow());
        }

        ConfigCommands::Get { key } => println!("{}", config.get(&key)?),

        ConfigCommands::Set { key, value } => {
            if matches!(key.as_str(), "from" | "default_account") && !value.is_empty() {
                parse_account(&value)?;
            }
            config.set(&key, &value)?;
            config.save_to(path)?;
            print_success(&format!("Set {} = {}", key, value));
        }

        ConfigCommands::Reset { yes } => {
            let confirmed = yes
                || Confirm::new()
                    .with_prompt("Reset configuration to defaults?")
                    .default(false)
                    .interact()?;
            if confirmed {
                CliConfig::default().save_to(path)?;
                print_success("Configuration reset to defaults");
            } else {
                print_warning("Reset cancelled");
            }
        }

        ConfigCommands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "ballot", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Caller for a state-changing command: `--from`, then config, then account #0.
fn resolve_caller(from: Option<&str>, config: &CliConfig) -> anyhow::Result<Address> {
    match from.or(config.default_account.as_deref()) {
        Some(account) => parse_account(account),
        None => Ok(Address::dev_account(0)),
    }
}

/// Parse an address argument: Bech32m, `0x` hex, or `#N` for development account N.
pub fn parse_account(s: &str) -> anyhow::Result<Address> {
    let s = s.trim();
    if let Some(index) = s.strip_prefix('#') {
        let index: u32 = index
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid development account: {}", s))?;
        return Ok(Address::dev_account(index));
    }
    Ok(s.parse::<Address>()?)
}

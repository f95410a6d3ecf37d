//! Output formatting utilities.
//!
//! Pretty printing for CLI commands.

use ballot_ledger::{Address, BallotEvent, Proposal, ProposalId, Voter, VotingLedger};
use colored::Colorize;
use tabled::{Table, Tabled};

/// Format address for display.
pub fn format_address(addr: &Address) -> String {
    addr.to_string()
}

/// Print success message.
pub fn print_success(msg: &str) {
    println!("{}", format!("✓ {}", msg).green());
}

/// Print error message.
pub fn print_error(msg: &str) {
    eprintln!("{}", format!("✗ {}", msg).red());
}

/// Print warning message.
pub fn print_warning(msg: &str) {
    println!("{}", format!("⚠ {}", msg).yellow());
}

/// Print info message.
pub fn print_info(msg: &str) {
    println!("{}", format!("ℹ {}", msg).blue());
}

/// Describe a ledger event in one line.
pub fn describe_event(event: &BallotEvent) -> String {
    match event {
        BallotEvent::RightGranted { voter } => {
            format!("Granted voting right to {}", format_address(voter))
        }
        BallotEvent::Delegated {
            from,
            delegate,
            weight,
            counted_for: Some(proposal),
            ..
        } => format!(
            "{} delegated weight {} to {} (counted for proposal #{})",
            format_address(from),
            weight,
            format_address(delegate),
            proposal
        ),
        BallotEvent::Delegated {
            from,
            delegate,
            weight,
            counted_for: None,
            ..
        } => format!(
            "{} delegated weight {} to {}",
            format_address(from),
            weight,
            format_address(delegate)
        ),
        BallotEvent::VoteCast {
            voter,
            proposal,
            weight,
        } => format!(
            "{} cast weight {} for proposal #{}",
            format_address(voter),
            weight,
            proposal
        ),
    }
}

/// Print proposal table, marking the current leader.
pub fn print_proposal_table(ledger: &VotingLedger) {
    #[derive(Tabled)]
    struct ProposalRow {
        index: ProposalId,
        name: String,
        votes: u64,
        leading: &'static str,
    }

    let winner = ledger.winning_proposal();
    let rows: Vec<ProposalRow> = ledger
        .proposals()
        .iter()
        .zip(0..)
        .map(|(proposal, index)| ProposalRow {
            index,
            name: proposal.name.to_string(),
            votes: proposal.vote_count,
            leading: if index == winner { "*" } else { "" },
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}

/// Print one proposal.
pub fn print_proposal(index: ProposalId, proposal: &Proposal) {
    println!("{}", format!("Proposal #{}", index).bold());
    println!("{}", "=".repeat(50));
    println!("Name:        {}", proposal.name.to_string().bright_cyan());
    println!("Bytes32:     {}", proposal.name.to_hex());
    println!("Vote count:  {}", proposal.vote_count.to_string().bright_green());
}

/// Print one voter record.
pub fn print_voter(address: &Address, voter: &Voter) {
    println!("{}", "Voter".bold());
    println!("{}", "=".repeat(50));
    println!("Address:     {}", format_address(address).bright_cyan());
    println!("Weight:      {}", voter.weight.to_string().bright_green());
    println!(
        "Voted:       {}",
        if voter.voted { "yes".yellow() } else { "no".normal() }
    );
    match voter.delegate {
        Some(delegate) => println!("Delegate:    {}", format_address(&delegate)),
        None => println!("Delegate:    -"),
    }
    match voter.vote {
        Some(proposal) => println!("Vote:        #{}", proposal),
        None => println!("Vote:        -"),
    }
}

/// Print the winning proposal.
pub fn print_winner(ledger: &VotingLedger) {
    let index = ledger.winning_proposal();
    let name = ledger.winner_name();
    let votes = ledger.proposal(index).map(|p| p.vote_count).unwrap_or(0);

    if ledger.total_votes() == 0 {
        print_warning("No votes cast yet; proposal #0 leads by default");
    }
    println!(
        "Winner: #{} {} ({} votes)",
        index,
        name.to_string().bright_green().bold(),
        votes
    );
}

/// Print account table.
pub fn print_account_table(accounts: &[(u32, Address)]) {
    #[derive(Tabled)]
    struct AccountRow {
        account: String,
        address: String,
        hex: String,
    }

    let rows: Vec<AccountRow> = accounts
        .iter()
        .map(|(n, addr)| AccountRow {
            account: format!("#{}", n),
            address: format_address(addr),
            hex: format!("{:x}", addr),
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}

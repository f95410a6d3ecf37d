//! Ballot Ledger - Weighted, delegable single-question voting.
//!
//! This crate provides:
//! - A fixed proposal list with running tallies
//! - Chairperson-granted voting rights
//! - Transitive delegation with loop detection
//! - Winner computation (strict maximum, lowest index on ties)

pub mod proposal;
pub mod voter;
pub mod delegation;
pub mod ledger;
pub mod call;
pub mod error;

pub use proposal::{Proposal, ProposalId};
pub use voter::Voter;
pub use ledger::VotingLedger;
pub use call::{Call, BallotEvent};
pub use error::{Action, BallotError};
pub use ballot_types::{Address, ProposalName};

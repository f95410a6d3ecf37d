//! Ballot proposals.
//!
//! The proposal list is fixed when the ledger is created; only vote counts
//! move afterwards.

use ballot_types::ProposalName;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Position of a proposal in the ballot.
pub type ProposalId = u32;

/// A named option on the ballot and its running tally.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct Proposal {
    /// Short name (up to 31 bytes)
    pub name: ProposalName,
    /// Accumulated vote weight
    pub vote_count: u64,
}

impl Proposal {
    /// Create a proposal with an empty tally.
    pub fn new(name: ProposalName) -> Self {
        Self { name, vote_count: 0 }
    }
}

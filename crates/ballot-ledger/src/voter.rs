//! Voter records.

use ballot_types::Address;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::proposal::ProposalId;

/// Per-address voting state.
///
/// Addresses that were never touched read as `Voter::default()`: no weight,
/// not voted, no delegate, no vote.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct Voter {
    /// Vote weight; grows as others delegate to this voter
    pub weight: u64,
    /// Whether this voter has voted or delegated
    pub voted: bool,
    /// Resolved delegate, set when the vote was delegated
    pub delegate: Option<Address>,
    /// Chosen proposal, set when voting directly
    pub vote: Option<ProposalId>,
}

impl Voter {
    /// Holds a right to vote (weight granted or delegated to it).
    pub fn has_right(&self) -> bool {
        self.weight > 0
    }

    /// Can still vote or delegate.
    pub fn can_act(&self) -> bool {
        !self.voted
    }

    pub fn is_delegating(&self) -> bool {
        self.delegate.is_some()
    }
}

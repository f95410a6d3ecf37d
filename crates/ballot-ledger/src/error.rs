use std::fmt;

use ballot_types::TypesError;
use thiserror::Error;

use crate::proposal::ProposalId;

/// Ledger operation that a caller attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    GiveRightToVote,
    Delegate,
    Vote,
}

impl Action {
    fn already_voted_message(&self) -> &'static str {
        match self {
            Action::GiveRightToVote => "The voter already voted.",
            Action::Delegate => "You already voted.",
            Action::Vote => "Already voted.",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::GiveRightToVote => "giveRightToVote",
            Action::Delegate => "delegate",
            Action::Vote => "vote",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in ballot operations.
///
/// A call that returns one of these has not changed the ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BallotError {
    #[error("Only chairperson can give right to vote.")]
    NotChairperson,

    #[error("Has no right to vote")]
    NoRightToVote,

    #[error("{}", .0.already_voted_message())]
    AlreadyVoted(Action),

    #[error("Voter already has the right to vote.")]
    AlreadyHasRight,

    #[error("Self-delegation is disallowed.")]
    SelfDelegation,

    #[error("Found loop in delegation.")]
    DelegationLoop,

    #[error("Delegate has no right to vote.")]
    InvalidDelegate,

    #[error("Unknown proposal {index}: ballot has {count} proposals")]
    UnknownProposal { index: ProposalId, count: usize },

    #[error("A ballot needs at least one proposal")]
    NoProposals,

    #[error("Too many proposals: max {max}, got {actual}")]
    TooManyProposals { max: usize, actual: usize },

    #[error("Invalid proposal name: {0}")]
    InvalidName(#[from] TypesError),

    #[error("Vote weight overflow")]
    WeightOverflow,

    #[error("Corrupt ledger state: {0}")]
    CorruptState(String),
}

impl BallotError {
    /// Stable identifier for the failure condition.
    pub fn code(&self) -> &'static str {
        match self {
            BallotError::NotChairperson => "not-chairperson",
            BallotError::NoRightToVote => "no-right-to-vote",
            BallotError::AlreadyVoted(_) => "already-voted",
            BallotError::AlreadyHasRight => "already-has-right",
            BallotError::SelfDelegation => "self-delegation",
            BallotError::DelegationLoop => "delegation-loop",
            BallotError::InvalidDelegate => "invalid-delegate",
            BallotError::UnknownProposal { .. } => "unknown-proposal",
            BallotError::NoProposals => "no-proposals",
            BallotError::TooManyProposals { .. } => "too-many-proposals",
            BallotError::InvalidName(_) => "invalid-name",
            BallotError::WeightOverflow => "weight-overflow",
            BallotError::CorruptState(_) => "corrupt-state",
        }
    }

    /// Caller lacks the role or weight the operation requires.
    pub fn is_authorization(&self) -> bool {
        matches!(self, BallotError::NotChairperson | BallotError::NoRightToVote)
    }
}

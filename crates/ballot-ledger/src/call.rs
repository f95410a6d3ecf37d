//! Call dispatch.
//!
//! A host hands the ledger one `Call` at a time together with the caller's
//! address, and gets back the event describing what changed.

use ballot_types::Address;
use serde::{Deserialize, Serialize};

use crate::error::{Action, BallotError};
use crate::ledger::VotingLedger;
use crate::proposal::ProposalId;

/// State-changing ballot call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum Call {
    GiveRightToVote { voter: Address },
    Delegate { to: Address },
    Vote { proposal: ProposalId },
}

impl Call {
    pub fn action(&self) -> Action {
        match self {
            Call::GiveRightToVote { .. } => Action::GiveRightToVote,
            Call::Delegate { .. } => Action::Delegate,
            Call::Vote { .. } => Action::Vote,
        }
    }
}

/// Record of a successful call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BallotEvent {
    RightGranted {
        voter: Address,
    },
    Delegated {
        from: Address,
        /// Address named in the call
        to: Address,
        /// End of the delegation chain
        delegate: Address,
        weight: u64,
        /// Proposal credited directly when the delegate had already voted
        counted_for: Option<ProposalId>,
    },
    VoteCast {
        voter: Address,
        proposal: ProposalId,
        weight: u64,
    },
}

impl VotingLedger {
    /// Apply `call` on behalf of `caller`.
    pub fn execute(&mut self, caller: Address, call: Call) -> Result<BallotEvent, BallotError> {
        tracing::debug!("Executing {} from {:x}", call.action(), caller);

        let result = match call {
            Call::GiveRightToVote { voter } => self.give_right_to_vote(caller, voter),
            Call::Delegate { to } => self.delegate(caller, to),
            Call::Vote { proposal } => self.vote(caller, proposal),
        };

        if let Err(e) = &result {
            tracing::debug!("{} from {:x} rejected: {} ({})", call.action(), caller, e, e.code());
        }
        result
    }

    /// Apply calls in order, stopping at the first failure.
    ///
    /// Calls before the failing one stay applied, as they would on a host
    /// that processes one call per transaction.
    pub fn execute_all<I>(&mut self, calls: I) -> Result<Vec<BallotEvent>, (usize, BallotError)>
    where
        I: IntoIterator<Item = (Address, Call)>,
    {
        calls
            .into_iter()
            .enumerate()
            .map(|(index, (caller, call))| self.execute(caller, call).map_err(|e| (index, e)))
            .collect()
    }
}

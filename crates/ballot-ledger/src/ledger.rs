//! The voting ledger.
//!
//! Owns the proposal list and the voter registry and applies the four
//! state transitions: construction, granting rights, delegating and voting.
//! Every transition validates the whole call before touching state, so a
//! returned error means nothing changed.

use std::collections::BTreeMap;

use ballot_types::{Address, ProposalName};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::call::BallotEvent;
use crate::delegation;
use crate::error::{Action, BallotError};
use crate::proposal::{Proposal, ProposalId};
use crate::voter::Voter;

/// Ballot state: chairperson, proposals and voter registry.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct VotingLedger {
    chairperson: Address,
    proposals: Vec<Proposal>,
    voters: BTreeMap<Address, Voter>,
}

impl VotingLedger {
    /// Create a ballot owned by `chairperson` over the given proposals.
    ///
    /// The chairperson starts with a weight of 1.
    ///
    /// # Errors
    /// - `NoProposals` if `names` is empty
    /// - `TooManyProposals` if the list does not fit a [`ProposalId`]
    pub fn new(chairperson: Address, names: Vec<ProposalName>) -> Result<Self, BallotError> {
        if names.is_empty() {
            return Err(BallotError::NoProposals);
        }
        let max = ProposalId::MAX as usize;
        if names.len() > max {
            return Err(BallotError::TooManyProposals {
                max,
                actual: names.len(),
            });
        }

        let proposals: Vec<Proposal> = names.into_iter().map(Proposal::new).collect();

        let mut voters = BTreeMap::new();
        voters.insert(
            chairperson,
            Voter {
                weight: 1,
                ..Voter::default()
            },
        );

        info!(
            "Created ballot with {} proposals, chairperson {}",
            proposals.len(),
            chairperson
        );

        Ok(Self {
            chairperson,
            proposals,
            voters,
        })
    }

    /// Create a ballot from plain-text proposal names.
    pub fn from_names<I, S>(chairperson: Address, names: I) -> Result<Self, BallotError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| ProposalName::encode(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(chairperson, names)
    }

    /// Give `voter` the right to vote. Only the chairperson may do this.
    ///
    /// # Errors
    /// - `NotChairperson` if `caller` is not the chairperson
    /// - `AlreadyVoted` if `voter` has already voted or delegated
    /// - `AlreadyHasRight` if `voter` already holds weight
    pub fn give_right_to_vote(
        &mut self,
        caller: Address,
        voter: Address,
    ) -> Result<BallotEvent, BallotError> {
        if caller != self.chairperson {
            debug!("Rejected grant from non-chairperson {:x}", caller);
            return Err(BallotError::NotChairperson);
        }

        let record = self.voter(&voter);
        if record.voted {
            return Err(BallotError::AlreadyVoted(Action::GiveRightToVote));
        }
        if record.weight != 0 {
            return Err(BallotError::AlreadyHasRight);
        }

        self.voters.entry(voter).or_default().weight = 1;
        info!("Granted right to vote to {}", voter);

        Ok(BallotEvent::RightGranted { voter })
    }

    /// Delegate the caller's vote to `to`.
    ///
    /// The delegation is resolved through `to`'s own delegate chain. If the
    /// final delegate already voted, the caller's weight goes straight into
    /// that proposal's tally; otherwise it is added to the delegate's weight.
    ///
    /// # Errors
    /// - `AlreadyVoted` if the caller has already voted or delegated
    /// - `SelfDelegation` if `to` is the caller
    /// - `DelegationLoop` if the chain from `to` leads back to the caller
    /// - `InvalidDelegate` if the final delegate holds no weight
    pub fn delegate(&mut self, caller: Address, to: Address) -> Result<BallotEvent, BallotError> {
        let sender = self.voter(&caller);
        if !sender.can_act() {
            return Err(BallotError::AlreadyVoted(Action::Delegate));
        }
        if to == caller {
            return Err(BallotError::SelfDelegation);
        }

        let resolved = delegation::resolve_delegate(&self.voters, caller, to, self.max_hops())?;

        let target = self.voter(&resolved);
        if !target.has_right() {
            debug!("Rejected delegation from {:x} to {:x}: no voting right", caller, resolved);
            return Err(BallotError::InvalidDelegate);
        }

        let counted_for = if target.voted {
            let proposal = target.vote.ok_or_else(|| {
                BallotError::CorruptState(format!("{} voted without a proposal", resolved))
            })?;
            let index = self.proposal_index(proposal)?;
            let count = self.proposals[index]
                .vote_count
                .checked_add(sender.weight)
                .ok_or(BallotError::WeightOverflow)?;

            self.proposals[index].vote_count = count;
            Some(proposal)
        } else {
            let weight = target
                .weight
                .checked_add(sender.weight)
                .ok_or(BallotError::WeightOverflow)?;

            self.voters.entry(resolved).or_default().weight = weight;
            None
        };

        let record = self.voters.entry(caller).or_default();
        record.voted = true;
        record.delegate = Some(resolved);

        info!("{} delegated weight {} to {}", caller, sender.weight, resolved);

        Ok(BallotEvent::Delegated {
            from: caller,
            to,
            delegate: resolved,
            weight: sender.weight,
            counted_for,
        })
    }

    /// Cast the caller's full weight for `proposal`.
    ///
    /// # Errors
    /// - `NoRightToVote` if the caller holds no weight
    /// - `AlreadyVoted` if the caller has already voted or delegated
    /// - `UnknownProposal` if `proposal` is out of range
    pub fn vote(
        &mut self,
        caller: Address,
        proposal: ProposalId,
    ) -> Result<BallotEvent, BallotError> {
        let sender = self.voter(&caller);
        if !sender.has_right() {
            debug!("Rejected vote from {:x}: no voting right", caller);
            return Err(BallotError::NoRightToVote);
        }
        if !sender.can_act() {
            return Err(BallotError::AlreadyVoted(Action::Vote));
        }

        let index = self.proposal_index(proposal)?;
        let count = self.proposals[index]
            .vote_count
            .checked_add(sender.weight)
            .ok_or(BallotError::WeightOverflow)?;

        self.proposals[index].vote_count = count;
        let record = self.voters.entry(caller).or_default();
        record.voted = true;
        record.vote = Some(proposal);

        info!("{} voted for proposal {} with weight {}", caller, proposal, sender.weight);

        Ok(BallotEvent::VoteCast {
            voter: caller,
            proposal,
            weight: sender.weight,
        })
    }

    /// Index of the proposal with the most votes.
    ///
    /// Ties go to the lowest index, so an untouched ballot reports 0.
    pub fn winning_proposal(&self) -> ProposalId {
        let mut winning = 0;
        let mut winning_count = 0;
        for (index, proposal) in self.proposals.iter().enumerate() {
            if proposal.vote_count > winning_count {
                winning_count = proposal.vote_count;
                winning = index;
            }
        }
        winning as ProposalId
    }

    /// Name of the winning proposal.
    pub fn winner_name(&self) -> ProposalName {
        self.proposal(self.winning_proposal())
            .map(|p| p.name)
            .unwrap_or_default()
    }

    pub fn chairperson(&self) -> Address {
        self.chairperson
    }

    pub fn proposal(&self, index: ProposalId) -> Option<&Proposal> {
        self.proposals.get(index as usize)
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// Voter record for `address`; the default record if never seen.
    pub fn voter(&self, address: &Address) -> Voter {
        self.voters.get(address).copied().unwrap_or_default()
    }

    /// Every address with a stored record, in address order.
    pub fn voters(&self) -> impl Iterator<Item = (&Address, &Voter)> {
        self.voters.iter()
    }

    /// Sum of all proposal tallies.
    pub fn total_votes(&self) -> u64 {
        self.proposals.iter().map(|p| p.vote_count).sum()
    }

    /// Voter currently holding `address`'s weight, following delegations.
    pub fn resolve_delegate(&self, address: Address) -> Result<Address, BallotError> {
        delegation::follow_chain(&self.voters, address, self.max_hops())
    }

    /// Check the structural invariants of a ledger restored from storage.
    pub fn check_integrity(&self) -> Result<(), BallotError> {
        if self.proposals.is_empty() {
            return Err(BallotError::NoProposals);
        }

        for (address, voter) in &self.voters {
            if let Some(proposal) = voter.vote {
                self.proposal_index(proposal).map_err(|_| {
                    BallotError::CorruptState(format!(
                        "{} voted for missing proposal {}",
                        address, proposal
                    ))
                })?;
            }
            if (voter.vote.is_some() || voter.is_delegating()) && voter.can_act() {
                return Err(BallotError::CorruptState(format!(
                    "{} has a vote or delegate but is not marked as voted",
                    address
                )));
            }
            if voter.vote.is_some() && voter.is_delegating() {
                return Err(BallotError::CorruptState(format!(
                    "{} both voted and delegated",
                    address
                )));
            }
            if voter.is_delegating() {
                self.resolve_delegate(*address)?;
            }
        }

        Ok(())
    }

    fn proposal_index(&self, proposal: ProposalId) -> Result<usize, BallotError> {
        let index = proposal as usize;
        if index >= self.proposals.len() {
            return Err(BallotError::UnknownProposal {
                index: proposal,
                count: self.proposals.len(),
            });
        }
        Ok(index)
    }

    /// A chain can visit each stored record at most once.
    fn max_hops(&self) -> usize {
        self.voters.len() + 1
    }
}

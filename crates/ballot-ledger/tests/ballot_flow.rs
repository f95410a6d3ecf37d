//! End-to-end ballot scenarios.
//!
//! Each test builds a fresh three-proposal ballot owned by development
//! account 0 and drives it through the public call surface.

use ballot_ledger::{Action, Address, BallotError, Call, ProposalId, ProposalName, VotingLedger};
use rand::Rng;

const PROPOSALS: [&str; 3] = ["Proposal 1", "Proposal 2", "Proposal 3"];

fn accounts(n: u32) -> Vec<Address> {
    (0..n).map(Address::dev_account).collect()
}

fn deploy() -> (VotingLedger, Vec<Address>) {
    let accounts = accounts(10);
    let ledger = VotingLedger::from_names(accounts[0], PROPOSALS).unwrap();
    (ledger, accounts)
}

fn give_right(ledger: &mut VotingLedger, chair: Address, voter: Address) {
    ledger.give_right_to_vote(chair, voter).unwrap();
}

mod deployment {
    use super::*;

    #[test]
    fn has_the_provided_proposals() {
        let (ledger, _) = deploy();
        for (index, name) in PROPOSALS.iter().enumerate() {
            let proposal = ledger.proposal(index as ProposalId).unwrap();
            assert_eq!(proposal.name.as_str(), *name);
        }
    }

    #[test]
    fn has_zero_votes_for_all_proposals() {
        let (ledger, _) = deploy();
        assert!(ledger.proposals().iter().all(|p| p.vote_count == 0));
    }

    #[test]
    fn sets_the_deployer_as_chairperson() {
        let (ledger, accounts) = deploy();
        assert_eq!(ledger.chairperson(), accounts[0]);
    }

    #[test]
    fn gives_the_chairperson_weight_one() {
        let (ledger, accounts) = deploy();
        assert_eq!(ledger.voter(&accounts[0]).weight, 1);
    }

    #[test]
    fn names_survive_bytes32_encoding() {
        let (ledger, _) = deploy();
        for (proposal, name) in ledger.proposals().iter().zip(PROPOSALS) {
            let raw = *proposal.name.as_bytes();
            let decoded = ProposalName::from_bytes(raw).unwrap();
            assert_eq!(decoded.as_str(), name);
        }
    }
}

mod give_right_to_vote {
    use super::*;

    #[test]
    fn gives_right_to_another_address() {
        let (mut ledger, accounts) = deploy();
        give_right(&mut ledger, accounts[0], accounts[1]);
        assert_eq!(ledger.voter(&accounts[1]).weight, 1);
    }

    #[test]
    fn rejects_someone_that_has_voted() {
        let (mut ledger, accounts) = deploy();
        give_right(&mut ledger, accounts[0], accounts[1]);
        ledger.vote(accounts[1], 0).unwrap();

        let err = ledger.give_right_to_vote(accounts[0], accounts[1]).unwrap_err();
        assert_eq!(err.to_string(), "The voter already voted.");
    }

    #[test]
    fn rejects_someone_that_already_has_rights() {
        let (mut ledger, accounts) = deploy();
        give_right(&mut ledger, accounts[0], accounts[1]);
        assert_eq!(
            ledger.give_right_to_vote(accounts[0], accounts[1]),
            Err(BallotError::AlreadyHasRight)
        );
    }

    #[test]
    fn rejects_non_chairperson() {
        let (mut ledger, accounts) = deploy();
        let attacker = accounts[2];
        let err = ledger.give_right_to_vote(attacker, accounts[1]).unwrap_err();
        assert_eq!(err.to_string(), "Only chairperson can give right to vote.");
        assert!(err.is_authorization());
    }
}

mod vote {
    use super::*;

    fn voted() -> (VotingLedger, Vec<Address>) {
        let (mut ledger, accounts) = deploy();
        give_right(&mut ledger, accounts[0], accounts[1]);
        ledger.vote(accounts[1], 0).unwrap();
        (ledger, accounts)
    }

    #[test]
    fn records_the_chosen_proposal() {
        let (ledger, accounts) = voted();
        assert_eq!(ledger.voter(&accounts[1]).vote, Some(0));
    }

    #[test]
    fn rejects_a_second_vote() {
        let (mut ledger, accounts) = voted();
        for proposal in 0..3 {
            let err = ledger.vote(accounts[1], proposal).unwrap_err();
            assert_eq!(err.to_string(), "Already voted.");
        }
    }

    #[test]
    fn rejects_address_without_rights() {
        let (mut ledger, accounts) = deploy();
        let err = ledger.vote(accounts[1], 0).unwrap_err();
        assert_eq!(err.to_string(), "Has no right to vote");
        assert!(err.is_authorization());
    }
}

mod delegate {
    use super::*;

    fn registered() -> (VotingLedger, Vec<Address>) {
        let (mut ledger, accounts) = deploy();
        for n in 1..=3 {
            give_right(&mut ledger, accounts[0], accounts[n]);
        }
        (ledger, accounts)
    }

    #[test]
    fn rejects_delegation_after_voting() {
        let (mut ledger, accounts) = registered();
        ledger.vote(accounts[1], 1).unwrap();

        let err = ledger.delegate(accounts[1], accounts[1]).unwrap_err();
        assert_eq!(err.to_string(), "You already voted.");
    }

    #[test]
    fn rejects_self_delegation() {
        let (mut ledger, accounts) = registered();
        let err = ledger.delegate(accounts[1], accounts[1]).unwrap_err();
        assert_eq!(err.to_string(), "Self-delegation is disallowed.");
    }

    #[test]
    fn rejects_delegation_loop() {
        let (mut ledger, accounts) = registered();
        ledger.delegate(accounts[1], accounts[2]).unwrap();
        ledger.delegate(accounts[2], accounts[3]).unwrap();

        let err = ledger.delegate(accounts[3], accounts[1]).unwrap_err();
        assert_eq!(err.to_string(), "Found loop in delegation.");
    }

    #[test]
    fn rejects_two_voter_loop() {
        let (mut ledger, accounts) = registered();
        ledger.delegate(accounts[1], accounts[2]).unwrap();
        let before = ledger.clone();

        assert_eq!(
            ledger.delegate(accounts[2], accounts[1]),
            Err(BallotError::DelegationLoop)
        );
        assert_eq!(ledger, before);
        assert!(!ledger.voter(&accounts[2]).voted);
        assert_eq!(ledger.voter(&accounts[2]).weight, 2);
    }

    #[test]
    fn rejects_loop_only_when_it_closes() {
        let (mut ledger, accounts) = registered();
        give_right(&mut ledger, accounts[0], accounts[4]);

        // 1 -> 2 -> 3 -> 4, every link accepted
        for n in 1..=3 {
            ledger.delegate(accounts[n], accounts[n + 1]).unwrap();
            assert_eq!(ledger.resolve_delegate(accounts[1]), Ok(accounts[n + 1]));
        }
        assert_eq!(ledger.voter(&accounts[4]).weight, 4);

        let before = ledger.clone();
        for n in 1..=3 {
            assert_eq!(
                ledger.delegate(accounts[4], accounts[n]),
                Err(BallotError::DelegationLoop)
            );
        }
        assert_eq!(ledger, before);

        // The chain end can still vote with the pooled weight
        ledger.vote(accounts[4], 1).unwrap();
        assert_eq!(ledger.proposal(1).unwrap().vote_count, 4);
    }

    #[test]
    fn rejects_second_delegation() {
        let (mut ledger, accounts) = registered();
        ledger.delegate(accounts[3], accounts[2]).unwrap();
        assert_eq!(
            ledger.delegate(accounts[3], accounts[1]),
            Err(BallotError::AlreadyVoted(Action::Delegate))
        );
    }

    #[test]
    fn rejects_delegation_to_non_voters() {
        let (mut ledger, accounts) = registered();
        let non_voter = accounts[4];
        assert_eq!(
            ledger.delegate(accounts[3], non_voter),
            Err(BallotError::InvalidDelegate)
        );
    }

    #[test]
    fn adds_weight_to_the_delegate() {
        let (mut ledger, accounts) = registered();
        ledger.delegate(accounts[1], accounts[2]).unwrap();
        assert_eq!(ledger.voter(&accounts[2]).weight, 2);
    }

    #[test]
    fn weightless_attacker_adds_nothing() {
        let (mut ledger, accounts) = deploy();
        let delegate = accounts[1];
        give_right(&mut ledger, accounts[0], delegate);

        let attacker = accounts[3];
        ledger.delegate(attacker, delegate).unwrap();
        assert_eq!(ledger.voter(&delegate).weight, 1);
    }
}

mod winner {
    use super::*;

    #[test]
    fn returns_zero_before_any_votes() {
        let (ledger, _) = deploy();
        assert_eq!(ledger.winning_proposal(), 0);
    }

    #[test]
    fn names_proposal_zero_before_any_votes() {
        let (ledger, _) = deploy();
        assert_eq!(ledger.winner_name().as_str(), PROPOSALS[0]);
    }

    #[test]
    fn follows_a_single_vote() {
        for proposal in 0..3u32 {
            let (mut ledger, accounts) = deploy();
            ledger.vote(accounts[0], proposal).unwrap();
            assert_eq!(ledger.winning_proposal(), proposal);
            assert_eq!(ledger.winner_name().as_str(), PROPOSALS[proposal as usize]);
        }
    }

    #[test]
    fn matches_an_off_ledger_count_of_five_random_votes() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let (mut ledger, accounts) = deploy();
            let mut counts = [0u64; 3];

            for voter in &accounts[1..=5] {
                ledger.give_right_to_vote(accounts[0], *voter).unwrap();
                let proposal = rng.gen_range(0..PROPOSALS.len());
                counts[proposal] += 1;
                ledger
                    .execute(*voter, Call::Vote { proposal: proposal as ProposalId })
                    .unwrap();
            }

            // Highest count, lowest index on ties
            let best = *counts.iter().max().unwrap();
            let expected = counts.iter().position(|&c| c == best).unwrap();

            assert_eq!(ledger.winning_proposal() as usize, expected);
            assert_eq!(ledger.winner_name().as_str(), PROPOSALS[expected]);
            assert_eq!(ledger.total_votes(), 5);
        }
    }

    #[test]
    fn counts_delegated_weight() {
        let (mut ledger, accounts) = deploy();
        for n in 1..=4 {
            give_right(&mut ledger, accounts[0], accounts[n]);
        }
        ledger.vote(accounts[1], 0).unwrap();
        ledger.vote(accounts[2], 0).unwrap();

        // Three voters pool their weight onto account 3
        ledger.delegate(accounts[4], accounts[3]).unwrap();
        ledger.delegate(accounts[0], accounts[3]).unwrap();
        ledger.vote(accounts[3], 2).unwrap();

        assert_eq!(ledger.proposal(2).unwrap().vote_count, 3);
        assert_eq!(ledger.winning_proposal(), 2);
    }
}

//! Delegation chain resolution.
//!
//! A delegated vote is forwarded along `voter.delegate` links until it
//! reaches a voter that has not delegated. Walks are bounded by a hop
//! limit so a corrupted registry can never spin forever.

use std::collections::{BTreeMap, HashSet};

use ballot_types::Address;

use crate::error::BallotError;
use crate::voter::Voter;

/// Resolve where a delegation from `delegator` to `to` ends up.
///
/// Follows the delegate links starting at `to`. Fails with
/// [`BallotError::DelegationLoop`] as soon as the walk lands back on
/// `delegator`, or when it runs past `max_hops` steps.
pub fn resolve_delegate(
    voters: &BTreeMap<Address, Voter>,
    delegator: Address,
    to: Address,
    max_hops: usize,
) -> Result<Address, BallotError> {
    if delegator == to {
        return Err(BallotError::SelfDelegation);
    }

    let mut current = to;
    for _ in 0..max_hops {
        let next = match voters.get(&current).and_then(|v| v.delegate) {
            Some(next) => next,
            None => return Ok(current),
        };
        if next == delegator {
            tracing::debug!("Delegation from {:x} loops back through {:x}", delegator, current);
            return Err(BallotError::DelegationLoop);
        }
        current = next;
    }

    tracing::debug!("Delegation from {:x} exceeded {} hops", delegator, max_hops);
    Err(BallotError::DelegationLoop)
}

/// Follow the delegate links from `address` to the voter that holds its
/// weight now. Returns `address` itself when it has not delegated.
pub fn follow_chain(
    voters: &BTreeMap<Address, Voter>,
    address: Address,
    max_hops: usize,
) -> Result<Address, BallotError> {
    let mut visited = HashSet::new();
    visited.insert(address);

    let mut current = address;
    for _ in 0..max_hops {
        match voters.get(&current).and_then(|v| v.delegate) {
            Some(next) => {
                if !visited.insert(next) {
                    return Err(BallotError::DelegationLoop);
                }
                current = next;
            }
            None => return Ok(current),
        }
    }

    Err(BallotError::DelegationLoop)
}

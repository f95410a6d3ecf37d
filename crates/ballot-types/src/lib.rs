//! Ballot Types - Primitive types shared by the ballot ledger and its hosts.
//!
//! This crate provides:
//! - Addresses (20-byte, Bech32m encoded)
//! - Proposal names (fixed 32-byte text, bytes32 string encoding)

pub mod address;
pub mod name;
pub mod error;

#[cfg(any(feature = "serde", feature = "borsh"))]
mod serialization;

pub use address::Address;
pub use name::ProposalName;
pub use error::TypesError;

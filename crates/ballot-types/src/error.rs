use thiserror::Error;

/// Errors that can occur while parsing or encoding primitive types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("Invalid address format: {0}")]
    InvalidAddressFormat(String),

    #[error("Invalid address length: expected 20, got {0}")]
    InvalidAddressLength(usize),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Bech32 error: {0}")]
    Bech32Error(String),

    #[error("Proposal name too long: max {max} bytes, got {actual}")]
    NameTooLong { max: usize, actual: usize },

    #[error("Proposal name contains a NUL byte")]
    NameContainsNul,

    #[error("Proposal name is not null-terminated")]
    UnterminatedName,

    #[error("Proposal name has data after its terminator")]
    NonCanonicalName,

    #[error("Proposal name is not valid UTF-8")]
    InvalidNameEncoding,
}

impl From<hex::FromHexError> for TypesError {
    fn from(e: hex::FromHexError) -> Self {
        TypesError::InvalidHex(e.to_string())
    }
}

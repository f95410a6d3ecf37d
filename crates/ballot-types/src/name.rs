use crate::error::TypesError;
use std::fmt;
use std::str::FromStr;

/// Fixed-width proposal name (bytes32 string encoding).
///
/// Layout: UTF-8 text right-padded with zero bytes to 32 bytes. The last
/// byte is always zero, so the text holds at most [`ProposalName::MAX_LEN`]
/// bytes. Every value of this type decodes, which keeps `as_str` infallible.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ProposalName([u8; 32]);

impl ProposalName {
    pub const LEN: usize = 32;
    /// Longest text that still leaves room for the terminator.
    pub const MAX_LEN: usize = Self::LEN - 1;

    /// Encode text into a zero-padded 32-byte name.
    pub fn encode(text: &str) -> Result<Self, TypesError> {
        let bytes = text.as_bytes();
        if bytes.len() > Self::MAX_LEN {
            return Err(TypesError::NameTooLong {
                max: Self::MAX_LEN,
                actual: bytes.len(),
            });
        }
        if bytes.contains(&0) {
            return Err(TypesError::NameContainsNul);
        }
        let mut out = [0u8; 32];
        out[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(out))
    }

    /// Accept raw bytes32 data.
    ///
    /// Only the form `encode` produces is accepted: valid UTF-8 text, then
    /// zero bytes through the end of the word. Equal text therefore always
    /// means equal bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, TypesError> {
        if bytes[Self::MAX_LEN] != 0 {
            return Err(TypesError::UnterminatedName);
        }
        let len = text_len(&bytes);
        if bytes[len..].iter().any(|&b| b != 0) {
            return Err(TypesError::NonCanonicalName);
        }
        std::str::from_utf8(&bytes[..len]).map_err(|_| TypesError::InvalidNameEncoding)?;
        Ok(Self(bytes))
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Decoded text, up to the first zero byte.
    pub fn as_str(&self) -> &str {
        let len = text_len(&self.0);
        // Validated on construction.
        std::str::from_utf8(&self.0[..len]).unwrap_or_default()
    }

    /// Convert to hex string with 0x prefix, as the raw word appears on the wire.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

fn text_len(bytes: &[u8; 32]) -> usize {
    bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len())
}

impl fmt::Display for ProposalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ProposalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProposalName({:?})", self.as_str())
    }
}

impl FromStr for ProposalName {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::encode(s)
    }
}

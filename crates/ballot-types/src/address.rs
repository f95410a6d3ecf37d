use crate::error::TypesError;
use std::fmt;
use std::str::FromStr;

/// 20-byte account address identifying a ballot participant.
/// Display format: Bech32m with "vote" human-readable prefix.
///
/// # Derivation
/// `address = blake3(ed25519_pubkey)[0..20]`
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    pub const LEN: usize = 20;

    /// Bech32m human-readable prefix
    pub const BECH32_HRP: &'static str = "vote";

    /// Seed prefix for development accounts.
    const DEV_ACCOUNT_SEED: &'static [u8] = b"ballot-dev-account";

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Create from a byte slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, TypesError> {
        if slice.len() != Self::LEN {
            return Err(TypesError::InvalidAddressLength(slice.len()));
        }
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Derive address from ed25519 public key bytes (32 bytes).
    /// Uses blake3 hash, takes first 20 bytes.
    pub fn from_public_key(pubkey: &[u8; 32]) -> Self {
        let hash = blake3::hash(pubkey);
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&hash.as_bytes()[..20]);
        Self(addr)
    }

    /// Deterministic development account number `index`.
    ///
    /// Stands in for the pre-funded signers a local test host hands out:
    /// the same index always yields the same address.
    pub fn dev_account(index: u32) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(Self::DEV_ACCOUNT_SEED);
        hasher.update(&index.to_le_bytes());
        Self::from_public_key(hasher.finalize().as_bytes())
    }

    /// Bech32m text, any letter case, with the `vote` prefix.
    fn is_bech32(s: &str) -> bool {
        s.get(..Self::BECH32_HRP.len() + 1)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("vote1"))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hrp = bech32::Hrp::parse_unchecked(Self::BECH32_HRP);
        match bech32::encode::<bech32::Bech32m>(hrp, &self.0) {
            Ok(encoded) => write!(f, "{}", encoded),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", hex::encode(self.0))
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::UpperHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode_upper(self.0))
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_bech32(s) {
            let (hrp, data) =
                bech32::decode(s).map_err(|e| TypesError::Bech32Error(e.to_string()))?;
            if hrp.to_lowercase() != Self::BECH32_HRP {
                return Err(TypesError::InvalidAddressFormat(format!(
                    "expected prefix '{}', got '{}'",
                    Self::BECH32_HRP,
                    hrp
                )));
            }
            return Self::from_slice(&data);
        }

        match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(digits) => Self::from_slice(&hex::decode(digits)?),
            None => Err(TypesError::InvalidAddressFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_from_public_key() {
        let pubkey = [42u8; 32];
        let addr = Address::from_public_key(&pubkey);
        assert_ne!(addr, Address::default());

        // Deterministic
        assert_eq!(addr, Address::from_public_key(&pubkey));

        // Different pubkey = different address
        assert_ne!(addr, Address::from_public_key(&[43u8; 32]));
    }

    #[test]
    fn test_dev_accounts_are_stable_and_distinct() {
        let first = Address::dev_account(0);
        assert_eq!(first, Address::dev_account(0));

        let accounts: std::collections::HashSet<_> = (0..20).map(Address::dev_account).collect();
        assert_eq!(accounts.len(), 20);
    }

    #[test]
    fn test_address_bech32m_roundtrip() {
        let bytes: [u8; 20] = (0..20).map(|i| i as u8).collect::<Vec<_>>().try_into().unwrap();
        let addr = Address::from_bytes(bytes);

        let encoded = addr.to_string();
        assert!(encoded.starts_with("vote1"));

        let decoded: Address = encoded.parse().unwrap();
        assert_eq!(addr, decoded);
    }

    #[test]
    fn test_address_bech32m_uppercase() {
        let addr = Address::dev_account(7);
        let upper = addr.to_string().to_uppercase();
        assert!(upper.starts_with("VOTE1"));
        assert_eq!(upper.parse::<Address>().unwrap(), addr);

        // Mixed case is not valid Bech32m
        let mut mixed = addr.to_string();
        mixed.replace_range(..1, "V");
        assert!(matches!(
            mixed.parse::<Address>(),
            Err(TypesError::Bech32Error(_))
        ));
    }

    #[test]
    fn test_address_hex_roundtrip() {
        let addr = Address::from_bytes([0xabu8; 20]);

        let hex = format!("{:x}", addr);
        let parsed: Address = hex.parse().unwrap();
        assert_eq!(addr, parsed);

        let upper = format!("{:X}", addr);
        assert_eq!(upper.parse::<Address>().unwrap(), addr);
    }

    #[test]
    fn test_address_from_str_invalid() {
        assert!(Address::from_str("invalid").is_err());
        assert!(Address::from_str("vote1qqqq").is_err());
        assert!(matches!(
            Address::from_str("0x1234"),
            Err(TypesError::InvalidAddressLength(2))
        ));
        assert!(matches!(
            Address::from_str("0xzz"),
            Err(TypesError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_address_ordering() {
        let addr1 = Address::from_bytes([0u8; 20]);
        let addr2 = Address::from_bytes([1u8; 20]);
        assert!(addr1 < addr2);
    }
}

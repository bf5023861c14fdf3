// Signature wrapper for serialization
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// =============================================================================
// Domain separation constants for governance signatures
// =============================================================================
//
// Each governance instruction signs under its own prefix so a signature made
// for one instruction can never be replayed as another.
// =============================================================================

/// Domain separator for pool fee-rate changes
pub const DOMAIN_SET_FEE_RATE: &[u8] = b"WHIRLPOOL_SET_FEE_RATE_V1:";

/// Domain separator for pool protocol-fee-rate changes
pub const DOMAIN_SET_PROTOCOL_FEE_RATE: &[u8] = b"WHIRLPOOL_SET_PROTOCOL_FEE_RATE_V1:";

/// Domain separator for config default fee-rate changes
pub const DOMAIN_SET_DEFAULT_FEE_RATE: &[u8] = b"WHIRLPOOL_SET_DEFAULT_FEE_RATE_V1:";

/// Domain separator for config default protocol-fee-rate changes
pub const DOMAIN_SET_DEFAULT_PROTOCOL_FEE_RATE: &[u8] =
    b"WHIRLPOOL_SET_DEFAULT_PROTOCOL_FEE_RATE_V1:";

/// Domain separator for pool key derivation
pub const DOMAIN_POOL_KEY: &[u8] = b"WHIRLPOOL_POOL_KEY_V1:";

/// Create a domain-separated message for signing
///
/// # Arguments
/// * `domain` - The domain separator (e.g., DOMAIN_SET_FEE_RATE)
/// * `message` - The message to sign
///
/// # Returns
/// A new Vec<u8> with domain prefix prepended to message
#[inline]
pub fn domain_separate(domain: &[u8], message: &[u8]) -> Vec<u8> {
    let mut separated = Vec::with_capacity(domain.len() + message.len());
    separated.extend_from_slice(domain);
    separated.extend_from_slice(message);
    separated
}

/// Ed25519 signature wrapper (64 bytes) with serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature64(pub [u8; 64]);

impl Signature64 {
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    pub fn zero() -> Self {
        Self([0; 64])
    }
}

impl From<[u8; 64]> for Signature64 {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

impl From<ed25519_dalek::Signature> for Signature64 {
    fn from(signature: ed25519_dalek::Signature) -> Self {
        Self(signature.to_bytes())
    }
}

// Manual serialization
impl Serialize for Signature64 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for Signature64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes = <Vec<u8>>::deserialize(deserializer)?;
        if bytes.len() != 64 {
            return Err(serde::de::Error::custom("Signature must be 64 bytes"));
        }
        let mut arr = [0u8; 64];
        arr.copy_from_slice(&bytes);
        Ok(Signature64(arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_separate_prefixes() {
        let msg = domain_separate(DOMAIN_SET_FEE_RATE, b"payload");
        assert!(msg.starts_with(DOMAIN_SET_FEE_RATE));
        assert!(msg.ends_with(b"payload"));
    }

    #[test]
    fn test_domains_are_distinct() {
        let domains = [
            DOMAIN_SET_FEE_RATE,
            DOMAIN_SET_PROTOCOL_FEE_RATE,
            DOMAIN_SET_DEFAULT_FEE_RATE,
            DOMAIN_SET_DEFAULT_PROTOCOL_FEE_RATE,
            DOMAIN_POOL_KEY,
        ];
        for (i, a) in domains.iter().enumerate() {
            for b in domains.iter().skip(i + 1) {
                assert!(!a.starts_with(b) && !b.starts_with(a));
            }
        }
    }

    #[test]
    fn test_signature_bincode_length_checked() {
        let sig = Signature64::from_bytes([9; 64]);
        let encoded = bincode::serialize(&sig).unwrap();
        let decoded: Signature64 = bincode::deserialize(&encoded).unwrap();
        assert_eq!(decoded, sig);

        let short = bincode::serialize(&vec![1u8; 10]).unwrap();
        assert!(bincode::deserialize::<Signature64>(&short).is_err());
    }
}

// Account - Identities and record keys
use ed25519_dalek::{Signature, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// AccountId = Ed25519 public key (32 bytes)
///
/// Used both as a signer identity (fee authority, callers) and as the key of
/// stored records. Human-readable encodings (JSON) use `0x`-prefixed hex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; 32]);

impl AccountId {
    pub const ZERO: AccountId = AccountId([0u8; 32]);

    pub fn from_signing_key(key: &SigningKey) -> Self {
        AccountId(key.verifying_key().to_bytes())
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        AccountId(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Full hex encoding with `0x` prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Verifies an Ed25519 signature made by this identity
    pub fn verify(&self, message: &[u8], signature: &[u8; 64]) -> bool {
        let public_key = match VerifyingKey::from_bytes(&self.0) {
            Ok(pk) => pk,
            Err(_) => return false,
        };

        let sig = Signature::from_bytes(signature);

        public_key.verify(message, &sig).is_ok()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0[..8]))
    }
}

impl From<[u8; 32]> for AccountId {
    fn from(bytes: [u8; 32]) -> Self {
        AccountId(bytes)
    }
}

impl FromStr for AccountId {
    type Err = AccountIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_str = s.strip_prefix("0x").unwrap_or(s);
        let bytes =
            hex::decode(hex_str).map_err(|e| AccountIdParseError::InvalidHex(e.to_string()))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| AccountIdParseError::InvalidLength(b.len()))?;
        Ok(AccountId(bytes))
    }
}

impl Serialize for AccountId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        } else {
            <[u8; 32]>::deserialize(deserializer).map(AccountId)
        }
    }
}

/// Account id parsing errors
#[derive(Debug, thiserror::Error)]
pub enum AccountIdParseError {
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid length: {0} bytes (expected 32)")]
    InvalidLength(usize),
}

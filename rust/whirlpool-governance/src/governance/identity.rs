// Identity - Proof that a request was authorized by a key holder
use crate::types::{AccountId, Signature64};

/// Oracle answering whether `proof` shows control of `identity` over `payload`.
///
/// The governance logic never inspects signatures itself; it only asks this.
pub trait IdentityVerifier: Send + Sync {
    fn identity_proved(&self, identity: &AccountId, payload: &[u8], proof: &Signature64) -> bool;
}

/// Ed25519 verifier over `AccountId` public keys
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl IdentityVerifier for Ed25519Verifier {
    fn identity_proved(&self, identity: &AccountId, payload: &[u8], proof: &Signature64) -> bool {
        identity.verify(payload, proof.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};
    use rand::rngs::OsRng;

    #[test]
    fn test_ed25519_verifier() {
        let key = SigningKey::generate(&mut OsRng);
        let identity = AccountId::from_signing_key(&key);
        let proof = Signature64::from(key.sign(b"payload"));

        assert!(Ed25519Verifier.identity_proved(&identity, b"payload", &proof));
        assert!(!Ed25519Verifier.identity_proved(&identity, b"tampered", &proof));
        assert!(!Ed25519Verifier.identity_proved(&identity, b"payload", &Signature64::zero()));
    }

    #[test]
    fn test_ed25519_verifier_rejects_other_identity() {
        let key = SigningKey::generate(&mut OsRng);
        let other = AccountId::from_signing_key(&SigningKey::generate(&mut OsRng));
        let proof = Signature64::from(key.sign(b"payload"));

        assert!(!Ed25519Verifier.identity_proved(&other, b"payload", &proof));
    }
}

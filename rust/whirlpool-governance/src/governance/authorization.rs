// Authorization - Who may change a pool's fees
use super::identity::IdentityVerifier;
use super::GovernanceError;
use crate::types::{AccountId, Instruction, SignedRequest, Whirlpool, WhirlpoolsConfig};

/// Returns the request's signer once its signature proves control of it.
///
/// An absent signature and a signature that does not verify are both
/// `MissingSignature`: neither proves the claimed identity.
pub fn authenticate<I, V>(
    verifier: &V,
    request: &SignedRequest<I>,
) -> Result<AccountId, GovernanceError>
where
    I: Instruction,
    V: IdentityVerifier + ?Sized,
{
    let proof = request.signature.as_ref().ok_or(GovernanceError::MissingSignature)?;

    if !verifier.identity_proved(&request.signer, &request.payload(), proof) {
        return Err(GovernanceError::MissingSignature);
    }

    Ok(request.signer)
}

/// Checks that `config` owns `pool` and that `caller` is its fee authority.
///
/// Linkage is checked first so an unrelated config never reveals anything
/// about its authority.
pub fn verify(
    pool: &Whirlpool,
    config: &WhirlpoolsConfig,
    caller: &AccountId,
) -> Result<(), GovernanceError> {
    verify_config_link(pool, config)?;
    verify_fee_authority(config, caller)
}

pub fn verify_config_link(
    pool: &Whirlpool,
    config: &WhirlpoolsConfig,
) -> Result<(), GovernanceError> {
    if pool.whirlpools_config != config.key {
        return Err(GovernanceError::ConfigMismatch);
    }
    Ok(())
}

pub fn verify_fee_authority(
    config: &WhirlpoolsConfig,
    caller: &AccountId,
) -> Result<(), GovernanceError> {
    if *caller != config.fee_authority {
        return Err(GovernanceError::AuthorityMismatch);
    }
    Ok(())
}

// Service - Fee governance orchestration
//
// Each operation: load records -> authenticate -> authorize -> bound -> build
// the updated record -> one conditional write. The first failure returns before
// the write, so a rejected request never changes anything.

use super::authorization::{authenticate, verify, verify_fee_authority};
use super::bounds::{validate_fee_rate, validate_protocol_fee_rate};
use super::identity::{Ed25519Verifier, IdentityVerifier};
use super::mutator::{
    apply_default_fee_rate, apply_default_protocol_fee_rate, apply_fee_rate,
    apply_protocol_fee_rate,
};
use super::GovernanceError;
use crate::storage::{Record, RecordStore};
use crate::types::{
    AccountId, Instruction, PoolInstruction, SetDefaultFeeRate, SetDefaultProtocolFeeRate,
    SetFeeRate, SetProtocolFeeRate, SignedRequest, Whirlpool, WhirlpoolsConfig,
};
use tracing::{info, warn};

/// Governance entry point over a record store and an identity oracle
pub struct GovernanceService<S, V = Ed25519Verifier> {
    store: S,
    verifier: V,
}

impl<S: RecordStore> GovernanceService<S, Ed25519Verifier> {
    /// Service verifying Ed25519 signatures
    pub fn with_ed25519(store: S) -> Self {
        Self::new(store, Ed25519Verifier)
    }
}

impl<S: RecordStore, V: IdentityVerifier> GovernanceService<S, V> {
    pub fn new(store: S, verifier: V) -> Self {
        Self { store, verifier }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_pool(&self, key: &AccountId) -> Result<Whirlpool, GovernanceError> {
        self.load(key)
    }

    pub fn get_config(&self, key: &AccountId) -> Result<WhirlpoolsConfig, GovernanceError> {
        self.load(key)
    }

    /// Sets a pool's fee rate. Only the owning config's fee authority may do so.
    pub fn set_fee_rate(
        &self,
        request: &SignedRequest<SetFeeRate>,
    ) -> Result<Whirlpool, GovernanceError> {
        let fee_rate = request.instruction.fee_rate;
        let result = self.update_pool(request, |pool| {
            validate_fee_rate(fee_rate)?;
            Ok(apply_fee_rate(pool, fee_rate))
        });

        if let Ok(ref pool) = result {
            info!("Fee rate of pool {} set to {}", pool.key, pool.fee_rate);
        }
        result
    }

    /// Sets a pool's protocol fee rate under the same authority rules
    pub fn set_protocol_fee_rate(
        &self,
        request: &SignedRequest<SetProtocolFeeRate>,
    ) -> Result<Whirlpool, GovernanceError> {
        let protocol_fee_rate = request.instruction.protocol_fee_rate;
        let result = self.update_pool(request, |pool| {
            validate_protocol_fee_rate(protocol_fee_rate)?;
            Ok(apply_protocol_fee_rate(pool, protocol_fee_rate))
        });

        if let Ok(ref pool) = result {
            info!("Protocol fee rate of pool {} set to {}", pool.key, pool.protocol_fee_rate);
        }
        result
    }

    /// Sets the fee rate new pools of a config start with. Existing pools keep theirs.
    pub fn set_default_fee_rate(
        &self,
        request: &SignedRequest<SetDefaultFeeRate>,
    ) -> Result<WhirlpoolsConfig, GovernanceError> {
        let default_fee_rate = request.instruction.default_fee_rate;
        let result = self.update_config(request, |config| {
            validate_fee_rate(default_fee_rate)?;
            Ok(apply_default_fee_rate(config, default_fee_rate))
        });

        if let Ok(ref config) = result {
            info!("Default fee rate of config {} set to {}", config.key, config.default_fee_rate);
        }
        result
    }

    pub fn set_default_protocol_fee_rate(
        &self,
        request: &SignedRequest<SetDefaultProtocolFeeRate>,
    ) -> Result<WhirlpoolsConfig, GovernanceError> {
        let default_protocol_fee_rate = request.instruction.default_protocol_fee_rate;
        let result = self.update_config(request, |config| {
            validate_protocol_fee_rate(default_protocol_fee_rate)?;
            Ok(apply_default_protocol_fee_rate(config, default_protocol_fee_rate))
        });

        if let Ok(ref config) = result {
            info!(
                "Default protocol fee rate of config {} set to {}",
                config.key, config.default_protocol_fee_rate
            );
        }
        result
    }

    fn update_pool<I, F>(
        &self,
        request: &SignedRequest<I>,
        build: F,
    ) -> Result<Whirlpool, GovernanceError>
    where
        I: PoolInstruction,
        F: FnOnce(&Whirlpool) -> Result<Whirlpool, GovernanceError>,
    {
        let result = self.try_update_pool(request, build);
        log_rejection(request, &result);
        result
    }

    fn try_update_pool<I, F>(
        &self,
        request: &SignedRequest<I>,
        build: F,
    ) -> Result<Whirlpool, GovernanceError>
    where
        I: PoolInstruction,
        F: FnOnce(&Whirlpool) -> Result<Whirlpool, GovernanceError>,
    {
        let pool: Whirlpool = self.load(request.instruction.pool())?;
        let config: WhirlpoolsConfig = self.load(request.instruction.config())?;

        let caller = authenticate(&self.verifier, request)?;
        verify(&pool, &config, &caller)?;

        let updated = build(&pool)?;
        self.publish(&pool, &updated)?;
        Ok(updated)
    }

    fn update_config<I, F>(
        &self,
        request: &SignedRequest<I>,
        build: F,
    ) -> Result<WhirlpoolsConfig, GovernanceError>
    where
        I: Instruction,
        F: FnOnce(&WhirlpoolsConfig) -> Result<WhirlpoolsConfig, GovernanceError>,
    {
        let result = self.try_update_config(request, build);
        log_rejection(request, &result);
        result
    }

    fn try_update_config<I, F>(
        &self,
        request: &SignedRequest<I>,
        build: F,
    ) -> Result<WhirlpoolsConfig, GovernanceError>
    where
        I: Instruction,
        F: FnOnce(&WhirlpoolsConfig) -> Result<WhirlpoolsConfig, GovernanceError>,
    {
        let config: WhirlpoolsConfig = self.load(request.instruction.config())?;

        let caller = authenticate(&self.verifier, request)?;
        verify_fee_authority(&config, &caller)?;

        let updated = build(&config)?;
        self.publish(&config, &updated)?;
        Ok(updated)
    }

    fn load<R: Record>(&self, key: &AccountId) -> Result<R, GovernanceError> {
        self.store
            .get(key)?
            .ok_or(GovernanceError::NotFound { kind: R::KIND, key: *key })
    }

    /// Single conditional write of `updated` over `current`
    fn publish<R: Record>(&self, current: &R, updated: &R) -> Result<(), GovernanceError> {
        if !self.store.compare_and_put(current, updated)? {
            return Err(GovernanceError::ConcurrentModification {
                kind: R::KIND,
                key: updated.key(),
            });
        }
        Ok(())
    }
}

fn log_rejection<I: Instruction, T>(
    request: &SignedRequest<I>,
    result: &Result<T, GovernanceError>,
) {
    if let Err(e) = result {
        warn!(
            "Rejected {} from {} on config {}: {} ({})",
            I::NAME,
            request.signer,
            request.instruction.config(),
            e,
            e.kind()
        );
    }
}

// Whirlpool - Per trading pair pool record
use super::account::AccountId;
use super::config::WhirlpoolsConfig;
use super::primitives::{FeeRate, Hash, ProtocolFeeRate, TickSpacing, NUM_REWARDS};
use super::signature::DOMAIN_POOL_KEY;
use serde::{Deserialize, Serialize};

/// Reward emission slot.
///
/// Maintained by the reward subsystem; carried through unchanged here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardInfo {
    pub mint: AccountId,
    pub vault: AccountId,
    pub authority: AccountId,
    /// Q64.64 tokens emitted per second
    pub emissions_per_second_x64: u128,
    /// Q64.64 reward growth per unit of liquidity
    pub growth_global_x64: u128,
}

/// Pool record.
///
/// `key` and `whirlpools_config` are fixed at creation. The fee governance
/// operations only ever write `fee_rate` and `protocol_fee_rate`; every other
/// field belongs to the swap, liquidity and reward subsystems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Whirlpool {
    pub key: AccountId,
    pub whirlpools_config: AccountId,
    pub token_mint_a: AccountId,
    pub token_mint_b: AccountId,
    pub tick_spacing: TickSpacing,

    /// Hundredths of a basis point
    pub fee_rate: FeeRate,
    /// Basis points of the collected fee
    pub protocol_fee_rate: ProtocolFeeRate,

    pub liquidity: u128,
    /// Q64.64
    pub sqrt_price: u128,
    pub tick_current_index: i32,
    pub protocol_fee_owed_a: u64,
    pub protocol_fee_owed_b: u64,
    pub fee_growth_global_a: u128,
    pub fee_growth_global_b: u128,
    pub reward_last_updated_timestamp: u64,
    pub reward_infos: [RewardInfo; NUM_REWARDS],
}

impl Whirlpool {
    /// Derives the pool key from its identifying tuple
    pub fn derive_key(
        config: &AccountId,
        token_mint_a: &AccountId,
        token_mint_b: &AccountId,
        tick_spacing: TickSpacing,
    ) -> AccountId {
        let hash = Hash::hash_parts(&[
            DOMAIN_POOL_KEY,
            config.as_bytes(),
            token_mint_a.as_bytes(),
            token_mint_b.as_bytes(),
            &tick_spacing.to_le_bytes(),
        ]);
        AccountId::from_bytes(*hash.as_bytes())
    }

    /// Builds a fresh pool record with the config's default fee rates
    pub fn new(
        config: &WhirlpoolsConfig,
        token_mint_a: AccountId,
        token_mint_b: AccountId,
        tick_spacing: TickSpacing,
        sqrt_price: u128,
    ) -> Self {
        Self {
            key: Self::derive_key(&config.key, &token_mint_a, &token_mint_b, tick_spacing),
            whirlpools_config: config.key,
            token_mint_a,
            token_mint_b,
            tick_spacing,
            fee_rate: config.default_fee_rate,
            protocol_fee_rate: config.default_protocol_fee_rate,
            liquidity: 0,
            sqrt_price,
            tick_current_index: 0,
            protocol_fee_owed_a: 0,
            protocol_fee_owed_b: 0,
            fee_growth_global_a: 0,
            fee_growth_global_b: 0,
            reward_last_updated_timestamp: 0,
            reward_infos: Default::default(),
        }
    }
}

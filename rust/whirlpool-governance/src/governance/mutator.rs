// Mutator - Builds updated records
//
// Updates are applied to a copy; the caller publishes the copy with a single
// conditional store write, so readers see either the old record or the new one.
use crate::types::{FeeRate, ProtocolFeeRate, Whirlpool, WhirlpoolsConfig};

/// Copy of `pool` with only `fee_rate` replaced
pub fn apply_fee_rate(pool: &Whirlpool, fee_rate: FeeRate) -> Whirlpool {
    Whirlpool {
        fee_rate,
        ..pool.clone()
    }
}

/// Copy of `pool` with only `protocol_fee_rate` replaced
pub fn apply_protocol_fee_rate(pool: &Whirlpool, protocol_fee_rate: ProtocolFeeRate) -> Whirlpool {
    Whirlpool {
        protocol_fee_rate,
        ..pool.clone()
    }
}

pub fn apply_default_fee_rate(
    config: &WhirlpoolsConfig,
    default_fee_rate: FeeRate,
) -> WhirlpoolsConfig {
    WhirlpoolsConfig {
        default_fee_rate,
        ..config.clone()
    }
}

pub fn apply_default_protocol_fee_rate(
    config: &WhirlpoolsConfig,
    default_protocol_fee_rate: ProtocolFeeRate,
) -> WhirlpoolsConfig {
    WhirlpoolsConfig {
        default_protocol_fee_rate,
        ..config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountId, RewardInfo};

    fn id(seed: u8) -> AccountId {
        AccountId::from_bytes([seed; 32])
    }

    fn busy_pool() -> Whirlpool {
        let config = WhirlpoolsConfig::new(id(1), id(2), id(3), id(4), 300, 300).unwrap();
        let mut pool = Whirlpool::new(&config, id(10), id(11), 64, 1u128 << 64);
        pool.liquidity = 1_000_000;
        pool.tick_current_index = -42;
        pool.fee_growth_global_a = 77;
        pool.protocol_fee_owed_b = 5;
        pool.reward_infos[1] = RewardInfo {
            mint: id(30),
            emissions_per_second_x64: 1 << 60,
            ..Default::default()
        };
        pool
    }

    #[test]
    fn test_apply_fee_rate_touches_only_fee_rate() {
        let pool = busy_pool();
        let updated = apply_fee_rate(&pool, 50);

        assert_eq!(updated.fee_rate, 50);
        assert_eq!(Whirlpool { fee_rate: pool.fee_rate, ..updated }, pool);
    }

    #[test]
    fn test_apply_fee_rate_idempotent() {
        let pool = busy_pool();
        let once = apply_fee_rate(&pool, 50);
        let twice = apply_fee_rate(&once, 50);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_protocol_fee_rate_touches_only_protocol_fee_rate() {
        let pool = busy_pool();
        let updated = apply_protocol_fee_rate(&pool, 1_000);

        assert_eq!(updated.protocol_fee_rate, 1_000);
        assert_eq!(updated.fee_rate, pool.fee_rate);
        assert_eq!(Whirlpool { protocol_fee_rate: pool.protocol_fee_rate, ..updated }, pool);
    }

    #[test]
    fn test_apply_defaults_touch_only_defaults() {
        let config = WhirlpoolsConfig::new(id(1), id(2), id(3), id(4), 300, 300).unwrap();

        let updated = apply_default_fee_rate(&config, 500);
        assert_eq!(updated.default_fee_rate, 500);
        assert_eq!(WhirlpoolsConfig { default_fee_rate: 300, ..updated }, config);

        let updated = apply_default_protocol_fee_rate(&config, 700);
        assert_eq!(updated.default_protocol_fee_rate, 700);
        assert_eq!(WhirlpoolsConfig { default_protocol_fee_rate: 300, ..updated }, config);
    }
}

// WhirlpoolsConfig - Governance unit shared by a family of pools
use super::account::AccountId;
use super::primitives::{FeeRate, ProtocolFeeRate};
use crate::governance::bounds::{validate_fee_rate, validate_protocol_fee_rate};
use crate::governance::GovernanceError;
use serde::{Deserialize, Serialize};

/// Protocol-wide governance record.
///
/// Created once by an administrative action outside this crate. Only the fee
/// defaults can change through this crate; authority rotation lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhirlpoolsConfig {
    /// Record key
    pub key: AccountId,

    /// Sole identity allowed to change fee rates of pools under this config
    pub fee_authority: AccountId,

    pub collect_protocol_fees_authority: AccountId,

    pub reward_emissions_super_authority: AccountId,

    /// Fee rate given to newly created pools
    pub default_fee_rate: FeeRate,

    /// Protocol fee rate given to newly created pools
    pub default_protocol_fee_rate: ProtocolFeeRate,
}

impl WhirlpoolsConfig {
    pub fn new(
        key: AccountId,
        fee_authority: AccountId,
        collect_protocol_fees_authority: AccountId,
        reward_emissions_super_authority: AccountId,
        default_fee_rate: FeeRate,
        default_protocol_fee_rate: ProtocolFeeRate,
    ) -> Result<Self, GovernanceError> {
        validate_fee_rate(default_fee_rate)?;
        validate_protocol_fee_rate(default_protocol_fee_rate)?;

        Ok(Self {
            key,
            fee_authority,
            collect_protocol_fees_authority,
            reward_emissions_super_authority,
            default_fee_rate,
            default_protocol_fee_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MAX_FEE_RATE, MAX_PROTOCOL_FEE_RATE};

    fn id(seed: u8) -> AccountId {
        AccountId::from_bytes([seed; 32])
    }

    #[test]
    fn test_config_new_keeps_authorities() {
        let config = WhirlpoolsConfig::new(id(1), id(2), id(3), id(4), 300, 300).unwrap();
        assert_eq!(config.key, id(1));
        assert_eq!(config.fee_authority, id(2));
        assert_eq!(config.collect_protocol_fees_authority, id(3));
        assert_eq!(config.reward_emissions_super_authority, id(4));
        assert_eq!(config.default_fee_rate, 300);
    }

    #[test]
    fn test_config_new_rejects_out_of_range_defaults() {
        let result = WhirlpoolsConfig::new(id(1), id(2), id(3), id(4), MAX_FEE_RATE, 0);
        assert!(matches!(result, Err(GovernanceError::FeeRateMaxExceeded { .. })));

        let result = WhirlpoolsConfig::new(id(1), id(2), id(3), id(4), 0, MAX_PROTOCOL_FEE_RATE);
        assert!(matches!(result, Err(GovernanceError::ProtocolFeeRateMaxExceeded { .. })));
    }
}

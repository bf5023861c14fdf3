// Bounds - Fee rate domain checks
use super::GovernanceError;
use crate::types::{FeeRate, ProtocolFeeRate, MAX_FEE_RATE, MAX_PROTOCOL_FEE_RATE};

/// Accepts `rate` only when it is strictly below `MAX_FEE_RATE`
pub fn validate_fee_rate(rate: FeeRate) -> Result<(), GovernanceError> {
    if rate >= MAX_FEE_RATE {
        return Err(GovernanceError::FeeRateMaxExceeded {
            rate,
            max: MAX_FEE_RATE,
        });
    }
    Ok(())
}

/// Accepts `rate` only when it is strictly below `MAX_PROTOCOL_FEE_RATE`
pub fn validate_protocol_fee_rate(rate: ProtocolFeeRate) -> Result<(), GovernanceError> {
    if rate >= MAX_PROTOCOL_FEE_RATE {
        return Err(GovernanceError::ProtocolFeeRateMaxExceeded {
            rate,
            max: MAX_PROTOCOL_FEE_RATE,
        });
    }
    Ok(())
}

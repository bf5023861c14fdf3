// Governance errors
use crate::storage::{RecordKind, StoreError};
use crate::types::AccountId;

/// Failure of a governance request.
///
/// Every variant is raised before any record is written.
#[derive(Debug, thiserror::Error)]
pub enum GovernanceError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: RecordKind, key: AccountId },

    #[error("Missing signature: signer did not prove control of the claimed identity")]
    MissingSignature,

    #[error("Authority mismatch: signer is not the config's fee authority")]
    AuthorityMismatch,

    #[error("Config mismatch: pool is not owned by the supplied config")]
    ConfigMismatch,

    #[error("Fee rate {rate} exceeds maximum (must be below {max})")]
    FeeRateMaxExceeded { rate: u16, max: u16 },

    #[error("Protocol fee rate {rate} exceeds maximum (must be below {max})")]
    ProtocolFeeRateMaxExceeded { rate: u16, max: u16 },

    #[error("Concurrent modification of {kind} {key}")]
    ConcurrentModification { kind: RecordKind, key: AccountId },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl GovernanceError {
    /// Whether the caller may resubmit the same request unchanged
    pub fn is_retryable(&self) -> bool {
        match self {
            GovernanceError::ConcurrentModification { .. } => true,
            GovernanceError::Store(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Short stable label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            GovernanceError::NotFound { .. } => "not_found",
            GovernanceError::MissingSignature => "missing_signature",
            GovernanceError::AuthorityMismatch => "authority_mismatch",
            GovernanceError::ConfigMismatch => "config_mismatch",
            GovernanceError::FeeRateMaxExceeded { .. } => "fee_rate_max_exceeded",
            GovernanceError::ProtocolFeeRateMaxExceeded { .. } => "protocol_fee_rate_max_exceeded",
            GovernanceError::ConcurrentModification { .. } => "concurrent_modification",
            GovernanceError::Store(_) => "store",
        }
    }
}

// Governance - Permissioned fee-rate changes
// Principle: authorize, bound, then write once; any failure leaves records untouched

pub mod authorization;
pub mod bounds;
pub mod error;
pub mod identity;
pub mod mutator;
pub mod service;

pub use error::GovernanceError;
pub use identity::{Ed25519Verifier, IdentityVerifier};
pub use service::GovernanceService;

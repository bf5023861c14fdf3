// Primitives - Fundamental fee-governance types

/// Universal hash (Blake3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash([u8; 32]);

impl Hash {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hash a sequence of parts without intermediate allocation
    pub fn hash_parts(parts: &[&[u8]]) -> Self {
        let mut hasher = blake3::Hasher::new();
        for part in parts {
            hasher.update(part);
        }
        Hash(*hasher.finalize().as_bytes())
    }
}

/// Pool fee rate, in hundredths of a basis point (1 unit = 0.0001%)
pub type FeeRate = u16;

/// Protocol fee rate, in basis points of the collected pool fee
pub type ProtocolFeeRate = u16;

/// Exclusive upper bound on a pool fee rate.
/// 10_000 hundredths of a basis point = 1%, so the largest accepted rate is 9_999.
pub const MAX_FEE_RATE: FeeRate = 10_000;

/// Exclusive upper bound on a protocol fee rate (2_500 bps = 25% of pool fees)
pub const MAX_PROTOCOL_FEE_RATE: ProtocolFeeRate = 2_500;

/// Tick spacing of a pool
pub type TickSpacing = u16;

/// Number of reward slots carried by a pool
pub const NUM_REWARDS: usize = 3;

// Request - Signed governance instructions
use super::account::AccountId;
use super::primitives::{FeeRate, ProtocolFeeRate};
use super::signature::{
    domain_separate, Signature64, DOMAIN_SET_DEFAULT_FEE_RATE, DOMAIN_SET_DEFAULT_PROTOCOL_FEE_RATE,
    DOMAIN_SET_FEE_RATE, DOMAIN_SET_PROTOCOL_FEE_RATE,
};
use ed25519_dalek::{Signer, SigningKey};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A governance instruction that can be signed
pub trait Instruction: Clone + fmt::Debug {
    /// Signature domain of this instruction
    const DOMAIN: &'static [u8];

    /// Name used in logs
    const NAME: &'static str;

    /// Config whose fee authority must sign the instruction
    fn config(&self) -> &AccountId;

    /// Fixed-layout encoding of the instruction fields
    fn encode(&self) -> Vec<u8>;
}

/// An instruction that targets a single pool
pub trait PoolInstruction: Instruction {
    fn pool(&self) -> &AccountId;
}

/// Change a pool's fee rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetFeeRate {
    pub config: AccountId,
    pub pool: AccountId,
    pub fee_rate: FeeRate,
}

/// Change a pool's protocol fee rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetProtocolFeeRate {
    pub config: AccountId,
    pub pool: AccountId,
    pub protocol_fee_rate: ProtocolFeeRate,
}

/// Change the fee rate given to new pools of a config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDefaultFeeRate {
    pub config: AccountId,
    pub default_fee_rate: FeeRate,
}

/// Change the protocol fee rate given to new pools of a config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDefaultProtocolFeeRate {
    pub config: AccountId,
    pub default_protocol_fee_rate: ProtocolFeeRate,
}

fn encode_fields(keys: &[&AccountId], value: u16) -> Vec<u8> {
    let mut out = Vec::with_capacity(keys.len() * 32 + 2);
    for key in keys {
        out.extend_from_slice(key.as_bytes());
    }
    out.extend_from_slice(&value.to_le_bytes());
    out
}

impl Instruction for SetFeeRate {
    const DOMAIN: &'static [u8] = DOMAIN_SET_FEE_RATE;
    const NAME: &'static str = "set_fee_rate";

    fn config(&self) -> &AccountId {
        &self.config
    }

    fn encode(&self) -> Vec<u8> {
        encode_fields(&[&self.config, &self.pool], self.fee_rate)
    }
}

impl PoolInstruction for SetFeeRate {
    fn pool(&self) -> &AccountId {
        &self.pool
    }
}

impl Instruction for SetProtocolFeeRate {
    const DOMAIN: &'static [u8] = DOMAIN_SET_PROTOCOL_FEE_RATE;
    const NAME: &'static str = "set_protocol_fee_rate";

    fn config(&self) -> &AccountId {
        &self.config
    }

    fn encode(&self) -> Vec<u8> {
        encode_fields(&[&self.config, &self.pool], self.protocol_fee_rate)
    }
}

impl PoolInstruction for SetProtocolFeeRate {
    fn pool(&self) -> &AccountId {
        &self.pool
    }
}

impl Instruction for SetDefaultFeeRate {
    const DOMAIN: &'static [u8] = DOMAIN_SET_DEFAULT_FEE_RATE;
    const NAME: &'static str = "set_default_fee_rate";

    fn config(&self) -> &AccountId {
        &self.config
    }

    fn encode(&self) -> Vec<u8> {
        encode_fields(&[&self.config], self.default_fee_rate)
    }
}

impl Instruction for SetDefaultProtocolFeeRate {
    const DOMAIN: &'static [u8] = DOMAIN_SET_DEFAULT_PROTOCOL_FEE_RATE;
    const NAME: &'static str = "set_default_protocol_fee_rate";

    fn config(&self) -> &AccountId {
        &self.config
    }

    fn encode(&self) -> Vec<u8> {
        encode_fields(&[&self.config], self.default_protocol_fee_rate)
    }
}

/// Instruction plus the identity claiming to authorize it.
///
/// `signature` is `None` when the caller presented no proof at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedRequest<I> {
    pub instruction: I,
    pub signer: AccountId,
    pub signature: Option<Signature64>,
}

impl<I: Instruction> SignedRequest<I> {
    /// Signs `instruction` with `key`; the signer is the key's public half
    pub fn sign(key: &SigningKey, instruction: I) -> Self {
        let signer = AccountId::from_signing_key(key);
        let payload = Self::signing_payload(&signer, &instruction);
        let signature = key.sign(&payload);

        Self {
            instruction,
            signer,
            signature: Some(signature.into()),
        }
    }

    /// Request that claims `signer` without any proof
    pub fn unsigned(signer: AccountId, instruction: I) -> Self {
        Self {
            instruction,
            signer,
            signature: None,
        }
    }

    /// Bytes covered by the signature: domain || signer || instruction
    pub fn signing_payload(signer: &AccountId, instruction: &I) -> Vec<u8> {
        let mut message = signer.as_bytes().to_vec();
        message.extend_from_slice(&instruction.encode());
        domain_separate(I::DOMAIN, &message)
    }

    pub fn payload(&self) -> Vec<u8> {
        Self::signing_payload(&self.signer, &self.instruction)
    }
}

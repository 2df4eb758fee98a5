//! # Attestation Entities
//!
//! The claim an oracle signs and the signature it signs it with.

use super::errors::{SignatureError, SignatureResult};
use serde::{Deserialize, Serialize};
use shared_types::{ChainId, Hash, Timestamp};

/// Length of an `r || s || v` signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// Finality status claimed by an attestation.
///
/// Encoded as a single `uint8`: 0 = Pending, 1 = Finalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FinalityStatus {
    Pending,
    Finalized,
}

impl FinalityStatus {
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Finalized => 1,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Pending),
            1 => Some(Self::Finalized),
            _ => None,
        }
    }
}

/// The claim an oracle attests to.
///
/// Two attestations agree exactly when their payloads are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttestationPayload {
    pub tx_hash: Hash,
    /// Attested finality time (seconds)
    pub timestamp: Timestamp,
    pub status: FinalityStatus,
    /// Confirmations required by the SLA
    pub sla_target: u64,
    pub chain_id: ChainId,
    /// Confirmation depth observed by the oracle
    pub confirmations: u64,
}

impl AttestationPayload {
    /// Whether the observed depth falls short of the SLA target.
    pub fn misses_sla(&self) -> bool {
        self.confirmations < self.sla_target
    }
}

/// secp256k1 recoverable signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EcdsaSignature {
    pub r: [u8; 32],
    pub s: [u8; 32],
    /// Recovery id, 0/1 or 27/28
    pub v: u8,
}

impl EcdsaSignature {
    /// Parse a 65-byte `r || s || v` signature.
    pub fn from_bytes(bytes: &[u8]) -> SignatureResult<Self> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(SignatureError::InvalidLength {
                expected: SIGNATURE_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v: bytes[64] })
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }
}

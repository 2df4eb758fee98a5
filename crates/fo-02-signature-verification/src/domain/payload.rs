//! # Canonical Attestation Payload
//!
//! Byte layout is a protocol contract shared with external signers:
//!
//! ```text
//! abi.encodePacked(bytes32 txHash, uint256 timestamp, uint8 status,
//!                  uint256 slaTarget, uint256 chainId, uint256 confirmations)
//! ```
//!
//! Big-endian fields in that order with no padding: five 32-byte words and a
//! single status byte, 161 bytes. This is what `solidityKeccak256` hashes on
//! the signing side. Oracles sign the EIP-191 personal-message hash of
//! `keccak256(payload)`.
//!
//! ```text
//! [0..32)    txHash
//! [32..64)   timestamp
//! [64]       status
//! [65..97)   slaTarget
//! [97..129)  chainId
//! [129..161) confirmations
//! ```

use super::ecdsa::keccak256;
use super::entities::AttestationPayload;
use shared_types::Hash;

/// Encoded payload length.
pub const PAYLOAD_LENGTH: usize = 5 * WORD + 1;

const WORD: usize = 32;

/// EIP-191 prefix for a 32-byte message.
const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

fn word_from_u64(value: u64) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&value.to_be_bytes());
    word
}

impl AttestationPayload {
    /// Packed ABI encoding of the payload.
    pub fn encode(&self) -> [u8; PAYLOAD_LENGTH] {
        let mut out = [0u8; PAYLOAD_LENGTH];
        out[..WORD].copy_from_slice(&self.tx_hash);
        out[WORD..2 * WORD].copy_from_slice(&word_from_u64(self.timestamp));
        out[2 * WORD] = self.status.as_u8();

        let tail = [self.sla_target, self.chain_id, self.confirmations];
        let base = 2 * WORD + 1;
        for (i, value) in tail.iter().enumerate() {
            out[base + i * WORD..base + (i + 1) * WORD].copy_from_slice(&word_from_u64(*value));
        }
        out
    }

    /// `keccak256(encode())`
    pub fn digest(&self) -> Hash {
        keccak256(&self.encode())
    }

    /// Hash the oracle actually signs.
    pub fn signing_hash(&self) -> Hash {
        personal_message_hash(&self.digest())
    }
}

/// `keccak256("\x19Ethereum Signed Message:\n32" || message)`
pub fn personal_message_hash(message: &Hash) -> Hash {
    let mut buf = Vec::with_capacity(PERSONAL_MESSAGE_PREFIX.len() + message.len());
    buf.extend_from_slice(PERSONAL_MESSAGE_PREFIX);
    buf.extend_from_slice(message);
    keccak256(&buf)
}

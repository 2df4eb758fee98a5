//! # Signature Verification Service
//!
//! secp256k1 implementation of [`AttestationVerifier`].

use crate::domain::ecdsa::recover_address;
use crate::domain::entities::{AttestationPayload, EcdsaSignature};
use crate::ports::inbound::AttestationVerifier;
use shared_types::Address;
use tracing::debug;

/// Recovers Ethereum-style signers of EIP-191 signed payloads.
#[derive(Debug, Clone, Default)]
pub struct EcdsaAttestationVerifier;

impl EcdsaAttestationVerifier {
    pub fn new() -> Self {
        Self
    }
}

impl AttestationVerifier for EcdsaAttestationVerifier {
    fn recover(&self, payload: &AttestationPayload, signature: &[u8]) -> Option<Address> {
        let signature = match EcdsaSignature::from_bytes(signature) {
            Ok(sig) => sig,
            Err(e) => {
                debug!("[fo-02] Rejecting signature: {}", e);
                return None;
            }
        };

        match recover_address(&payload.signing_hash(), &signature) {
            Ok(address) => Some(address),
            Err(e) => {
                debug!("[fo-02] Recovery failed: {}", e);
                None
            }
        }
    }
}

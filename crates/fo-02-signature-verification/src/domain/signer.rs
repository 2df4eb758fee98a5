//! # Attestation Signer
//!
//! Development signer producing signatures in the exact form oracles submit:
//! low-S, `v` in `{27, 28}`, over the EIP-191 hash of the payload digest.

use super::ecdsa::{address_from_pubkey, invert_s, is_low_s};
use super::entities::{AttestationPayload, EcdsaSignature};
use super::errors::{SignatureError, SignatureResult};
use k256::ecdsa::SigningKey;
use shared_types::{decode_hex, Address, Hash};
use zeroize::Zeroizing;

/// secp256k1 signing key with its derived address.
///
/// The key material is zeroized on drop.
pub struct AttestationSigner {
    key: SigningKey,
    address: Address,
}

impl AttestationSigner {
    /// Build from a 32-byte secret scalar.
    pub fn from_bytes(secret: &[u8]) -> SignatureResult<Self> {
        if secret.len() != 32 {
            return Err(SignatureError::InvalidKey);
        }
        let key = SigningKey::from_slice(secret).map_err(|_| SignatureError::InvalidKey)?;
        let address = address_from_pubkey(key.verifying_key());
        Ok(Self { key, address })
    }

    /// Parse a hex secret key, with or without `0x`.
    pub fn from_hex(secret: &str) -> SignatureResult<Self> {
        let bytes = Zeroizing::new(decode_hex(secret).map_err(|_| SignatureError::InvalidKey)?);
        Self::from_bytes(&bytes)
    }

    pub fn random() -> Self {
        let key = SigningKey::random(&mut rand::thread_rng());
        let address = address_from_pubkey(key.verifying_key());
        Self { key, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a 32-byte prehash, normalizing S to the lower half.
    pub fn sign_hash(&self, hash: &Hash) -> SignatureResult<EcdsaSignature> {
        let (sig, recid) = self
            .key
            .sign_prehash_recoverable(hash)
            .map_err(|_| SignatureError::SigningFailed)?;

        let bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        // Inverting S flips the parity of the recovered point.
        let (s, parity) = if is_low_s(&s) {
            (s, recid.to_byte() & 1)
        } else {
            (invert_s(&s), (recid.to_byte() & 1) ^ 1)
        };

        Ok(EcdsaSignature { r, s, v: 27 + parity })
    }

    /// Sign an attestation payload the way a wallet `signMessage` would.
    pub fn sign_payload(&self, payload: &AttestationPayload) -> SignatureResult<EcdsaSignature> {
        self.sign_hash(&payload.signing_hash())
    }
}

impl std::fmt::Debug for AttestationSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttestationSigner")
            .field("address", &shared_types::to_hex(&self.address))
            .finish_non_exhaustive()
    }
}

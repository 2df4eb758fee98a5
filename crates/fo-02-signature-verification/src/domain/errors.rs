//! # Signature Errors

use thiserror::Error;

/// Errors produced while parsing or recovering a signature.
///
/// These never cross the `AttestationVerifier::verify` boundary, which
/// reports any failure as `false`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// R or S out of range, or R not an x-coordinate on the curve
    #[error("Invalid signature format")]
    InvalidFormat,

    #[error("Invalid signature length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// S in the upper half of the curve order (EIP-2)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// v must be 0, 1, 27 or 28
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    #[error("Failed to recover public key")]
    RecoveryFailed,

    #[error("Signer mismatch: expected {expected:?}, got {actual:?}")]
    SignerMismatch {
        expected: [u8; 20],
        actual: [u8; 20],
    },

    #[error("Invalid signing key")]
    InvalidKey,

    #[error("Signing failed")]
    SigningFailed,
}

pub type SignatureResult<T> = Result<T, SignatureError>;

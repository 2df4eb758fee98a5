//! # ECDSA Recovery (secp256k1)
//!
//! Recovers the Ethereum address that produced a signature over a prehashed
//! message.
//!
//! ## Security Notes
//!
//! - **Malleability (EIP-2)**: S must not exceed half the curve order
//! - **Scalar range**: R and S must be in `[1, n-1]`
//! - **R point**: R must be a valid x-coordinate on the curve
//! - Range comparisons are constant-time (`subtle`)

use super::entities::EcdsaSignature;
use super::errors::{SignatureError, SignatureResult};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::elliptic_curve::sec1::FromEncodedPoint;
use k256::{AffinePoint, EncodedPoint};
use sha3::{Digest, Keccak256};
use shared_types::{Address, Hash};
use subtle::{Choice, ConstantTimeEq};

/// secp256k1 curve order n
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// n / 2
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Recover the signer address of `message_hash`.
///
/// Checks performed before recovery:
/// 1. R and S are in `[1, n-1]`
/// 2. R is an x-coordinate on the curve
/// 3. S is in the lower half of the order
/// 4. v is 0, 1, 27 or 28
pub fn recover_address(message_hash: &Hash, signature: &EcdsaSignature) -> SignatureResult<Address> {
    if !is_valid_scalar(&signature.r) || !is_valid_r_coordinate(&signature.r) {
        return Err(SignatureError::InvalidFormat);
    }
    if !is_valid_scalar(&signature.s) {
        return Err(SignatureError::InvalidFormat);
    }
    if !is_low_s(&signature.s) {
        return Err(SignatureError::MalleableSignature);
    }

    let recovery_id = parse_recovery_id(signature.v)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);
    let sig = Signature::from_slice(&sig_bytes).map_err(|_| SignatureError::InvalidFormat)?;

    let key = VerifyingKey::recover_from_prehash(message_hash, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    Ok(address_from_pubkey(&key))
}

/// Recover and compare against `expected`.
pub fn verify_signer(
    message_hash: &Hash,
    signature: &EcdsaSignature,
    expected: Address,
) -> SignatureResult<()> {
    let actual = recover_address(message_hash, signature)?;
    if actual != expected {
        return Err(SignatureError::SignerMismatch { expected, actual });
    }
    Ok(())
}

pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Last 20 bytes of `keccak256(x || y)` of the uncompressed public key.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let encoded = public_key.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Constant-time big-endian `a < b`.
fn ct_less_than(a: &[u8; 32], b: &[u8; 32]) -> Choice {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let undecided = !(less | greater);
        less |= undecided & Choice::from((a[i] < b[i]) as u8);
        greater |= undecided & Choice::from((a[i] > b[i]) as u8);
    }
    less
}

/// `s <= n/2`
pub(crate) fn is_low_s(s: &[u8; 32]) -> bool {
    (!ct_less_than(&SECP256K1_HALF_ORDER, s)).into()
}

/// Scalar in `[1, n-1]`.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }
    (!is_zero & ct_less_than(scalar, &SECP256K1_ORDER)).into()
}

/// Only about half of all field elements are x-coordinates of a curve point.
fn is_valid_r_coordinate(r: &[u8; 32]) -> bool {
    let mut compressed = [0u8; 33];
    compressed[0] = 0x02;
    compressed[1..].copy_from_slice(r);

    match EncodedPoint::from_bytes(compressed) {
        Ok(encoded) => AffinePoint::from_encoded_point(&encoded).is_some().into(),
        Err(_) => false,
    }
}

fn parse_recovery_id(v: u8) -> SignatureResult<RecoveryId> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };
    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

/// `n - s`, mapping a high S to its low twin and back.
pub fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = (SECP256K1_ORDER[i] as i32) - (s[i] as i32) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }
    result
}

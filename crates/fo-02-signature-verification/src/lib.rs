//! # Signature Verification Subsystem (FO-02)
//!
//! Binds each attestation to the staked identity that signed it.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): canonical payload encoding, secp256k1 recovery, dev signer
//! - **Ports Layer** (`ports/`): the [`AttestationVerifier`] trait consumed by the ledger
//! - **Service Layer** (`service.rs`): the ECDSA implementation of that trait
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: signatures with high S values are rejected
//! - **Never throws**: `verify` reports malformed input as `false`

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::ecdsa::{address_from_pubkey, keccak256, recover_address, verify_signer};
pub use domain::entities::{AttestationPayload, EcdsaSignature, FinalityStatus, SIGNATURE_LENGTH};
pub use domain::errors::{SignatureError, SignatureResult};
pub use domain::payload::{personal_message_hash, PAYLOAD_LENGTH};
pub use domain::signer::AttestationSigner;
pub use ports::inbound::AttestationVerifier;
pub use service::EcdsaAttestationVerifier;

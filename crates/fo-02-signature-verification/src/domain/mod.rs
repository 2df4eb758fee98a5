//! Domain layer: payload encoding and secp256k1 logic, no I/O.

pub mod ecdsa;
pub mod entities;
pub mod errors;
pub mod payload;
pub mod signer;

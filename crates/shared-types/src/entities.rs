//! # Core Primitive Entities
//!
//! Identifiers shared by the registry, the verifier and the ledger.

/// A 32-byte hash (keccak256 digests, transaction hashes, merkle nodes).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address identifying an oracle.
pub type Address = [u8; 20];

/// Identifier of the external chain a transaction lives on (EIP-155 chain id).
pub type ChainId = u64;

/// Amount in the smallest denomination (wei).
pub type Wei = u128;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// One ether expressed in wei.
pub const WEI_PER_ETHER: Wei = 1_000_000_000_000_000_000;

/// The all-zero hash.
pub const ZERO_HASH: Hash = [0u8; 32];

/// The all-zero address.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Convert an ether amount given in thousandths to wei.
///
/// `milli_ether(1_500)` is 1.5 ether.
pub const fn milli_ether(milli: u64) -> Wei {
    (milli as Wei) * (WEI_PER_ETHER / 1_000)
}

//! # Hex Encoding Helpers
//!
//! `0x`-prefixed hex is the external representation of hashes and addresses.

use crate::entities::{Address, Hash};
use crate::errors::EncodingError;

/// Decode a hex string (with or without `0x`) into raw bytes.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, EncodingError> {
    let trimmed = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    hex::decode(trimmed).map_err(|e| EncodingError::InvalidHex(e.to_string()))
}

/// Decode exactly `N` bytes from a hex string.
pub fn decode_fixed<const N: usize>(input: &str) -> Result<[u8; N], EncodingError> {
    let bytes = decode_hex(input)?;
    bytes_to_fixed(&bytes)
}

/// Copy a slice into a fixed array, rejecting any other length.
pub fn bytes_to_fixed<const N: usize>(bytes: &[u8]) -> Result<[u8; N], EncodingError> {
    <[u8; N]>::try_from(bytes).map_err(|_| EncodingError::InvalidLength {
        expected: N,
        actual: bytes.len(),
    })
}

/// Parse an address from hex.
pub fn parse_address(input: &str) -> Result<Address, EncodingError> {
    decode_fixed::<20>(input)
}

/// Parse a 32-byte hash from hex.
pub fn parse_hash(input: &str) -> Result<Hash, EncodingError> {
    decode_fixed::<32>(input)
}

/// Format bytes as `0x`-prefixed lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Short form used in log lines: `0xabcd…1234`.
pub fn short_hex(bytes: &[u8]) -> String {
    if bytes.len() <= 4 {
        return to_hex(bytes);
    }
    format!(
        "0x{}…{}",
        hex::encode(&bytes[..2]),
        hex::encode(&bytes[bytes.len() - 2..])
    )
}

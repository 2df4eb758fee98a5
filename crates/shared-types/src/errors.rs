//! # Error Types
//!
//! Errors for parsing primitive identifiers.

use thiserror::Error;

/// Errors raised while decoding hex-encoded identifiers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// Input is not valid hex.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded value has the wrong byte length.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

//! Error types for the oracle registry

use shared_types::{Address, Wei};
use thiserror::Error;

/// Oracle registry errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Active oracle count already equals the configured maximum
    #[error("Oracle capacity exceeded: {max} active oracles allowed")]
    CapacityExceeded { max: u32 },

    /// Offered stake is below the minimum stake parameter
    #[error("Insufficient stake: offered {stake} wei, minimum is {min} wei")]
    InsufficientStake { stake: Wei, min: Wei },

    /// Oracle is already registered and active
    #[error("Oracle already registered: {address:?}")]
    AlreadyRegistered { address: Address },

    /// Oracle was never admitted
    #[error("Unknown oracle: {address:?}")]
    UnknownOracle { address: Address },

    /// The zero address cannot be admitted
    #[error("The zero address cannot be an oracle")]
    ZeroAddress,

    /// Parameter value outside its allowed bounds
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Restored state violates a registry invariant
    #[error("Registry invariant violated: {reason}")]
    InvariantViolation { reason: String },
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

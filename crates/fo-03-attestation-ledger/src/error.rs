//! Error types for the attestation ledger

use fo_01_oracle_registry::RegistryError;
use shared_types::Address;
use thiserror::Error;

/// Submission failures.
///
/// Every variant except `Registry` is raised before the ledger is touched,
/// so a failed submission leaves no trace.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    /// Submitter is unknown or has been deactivated
    #[error("Oracle not active: {oracle:?}")]
    OracleNotActive { oracle: Address },

    /// Signature does not recover to any registered oracle
    #[error("Bad signature from oracle {oracle:?}")]
    BadSignature { oracle: Address },

    #[error("Malformed merkle proof: {reason}")]
    MalformedProof { reason: String },

    /// Internal consistency check failed; only this submission is aborted
    #[error("Ledger invariant violated: {reason}")]
    InvariantViolation { reason: String },

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

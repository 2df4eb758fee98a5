//! Error taxonomy of the oracle service
//!
//! Admission errors go back to the administrator, submission errors to the
//! submitting client. Neither is retried by the service. Lookups of unknown
//! keys or oracles are `None`, not errors.

use fo_01_oracle_registry::RegistryError;
use fo_03_attestation_ledger::LedgerError;
use shared_types::{Address, Wei};
use thiserror::Error;

/// Administrative failures.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdmissionError {
    #[error("Oracle capacity exceeded (max {max})")]
    CapacityExceeded { max: u32 },

    #[error("Insufficient stake: {stake} < minimum {min}")]
    InsufficientStake { stake: Wei, min: Wei },

    #[error("Oracle already registered: {address:?}")]
    AlreadyRegistered { address: Address },

    #[error("Unknown oracle: {address:?}")]
    UnknownOracle { address: Address },

    /// Caller is not the owner, or the capability belongs to another controller
    #[error("Unauthorized caller: {caller:?}")]
    Unauthorized { caller: Address },

    /// Removal refused while the oracle has conflicts on pending proofs
    #[error("Oracle {address:?} has unresolved conflicts on {pending} pending proofs")]
    OracleHasUnresolvedConflicts { address: Address, pending: usize },

    #[error("Oracle address must not be zero")]
    ZeroAddress,

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Internal error: {reason}")]
    Internal { reason: String },
}

impl From<RegistryError> for AdmissionError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::CapacityExceeded { max } => Self::CapacityExceeded { max },
            RegistryError::InsufficientStake { stake, min } => {
                Self::InsufficientStake { stake, min }
            }
            RegistryError::AlreadyRegistered { address } => Self::AlreadyRegistered { address },
            RegistryError::UnknownOracle { address } => Self::UnknownOracle { address },
            RegistryError::ZeroAddress => Self::ZeroAddress,
            RegistryError::InvalidParameter { name, reason } => {
                Self::InvalidParameter { name, reason }
            }
            RegistryError::InvariantViolation { reason } => Self::Internal { reason },
        }
    }
}

/// Submission failures. A failed submission has no side effects.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmissionError {
    #[error("Oracle not active: {oracle:?}")]
    OracleNotActive { oracle: Address },

    #[error("Bad signature from oracle {oracle:?}")]
    BadSignature { oracle: Address },

    /// Request shape rejected before touching the ledger
    #[error("Invalid argument {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    #[error("Malformed merkle proof: {reason}")]
    MalformedProof { reason: String },

    /// Invariant violation; only this submission was aborted
    #[error("Internal error: {reason}")]
    Internal { reason: String },
}

impl From<LedgerError> for SubmissionError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::OracleNotActive { oracle } => Self::OracleNotActive { oracle },
            LedgerError::BadSignature { oracle } => Self::BadSignature { oracle },
            LedgerError::MalformedProof { reason } => Self::MalformedProof { reason },
            LedgerError::InvariantViolation { reason } => Self::Internal { reason },
            LedgerError::Registry(e) => Self::Internal {
                reason: e.to_string(),
            },
        }
    }
}

/// Snapshot persistence failures.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SnapshotError {
    #[error("Snapshot I/O error at {path}: {message}")]
    Io { path: String, message: String },

    #[error("Snapshot encoding error: {0}")]
    Encoding(String),

    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Snapshot content violates an engine invariant
    #[error("Snapshot rejected: {0}")]
    Invariant(String),
}

/// Configuration loading failures.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config value {field}: {reason}")]
    Invalid { field: String, reason: String },
}

/// Top-level service error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error(transparent)]
    Admission(#[from] AdmissionError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type AdmissionResult<T> = Result<T, AdmissionError>;
pub type SubmissionResult<T> = Result<T, SubmissionError>;
pub type SnapshotResult<T> = Result<T, SnapshotError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ServiceResult<T> = Result<T, ServiceError>;

//! Ledger domain entities

pub mod attestation;
pub mod merkle;
pub mod proof;
pub mod receipt;

pub use attestation::{ConflictRecord, OracleAttestation, Submission};
pub use merkle::{MerkleProof, MAX_MERKLE_DEPTH};
pub use proof::{FinalityProof, PayloadGroup, ProofKey};
pub use receipt::{SubmissionOutcome, SubmissionReceipt};

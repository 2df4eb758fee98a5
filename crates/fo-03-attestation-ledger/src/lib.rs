//! # fo-03-attestation-ledger
//!
//! Per-transaction aggregation of oracle attestations.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **FinalityProof**: one append-only record per `(chain_id, tx_hash)`
//! - **Quorum**: attestations grouped by identical payload; the first group
//!   claiming `Finalized` to reach `required_signatures` freezes the proof
//! - **Conflict detection**: a second, different claim from the same oracle
//!   is never counted and is slashed once
//! - **Merkle proofs**: structural validation of optional external-state paths
//!
//! ## Submission Flow
//!
//! ```text
//! Submission ──→ active? ──→ signature ──→ merkle shape ──→ [key lock]
//!                   │            │               │               │
//!             OracleNotActive  BadSignature  MalformedProof      ├── Finalized   → AlreadyFinalized
//!                              (or replay                        ├── same claim  → Duplicate
//!                               → slash)                         ├── other claim → Conflict + slash
//!                                                                └── append → quorum? → Finalized
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use fo_03_attestation_ledger::{AttestationLedger, LedgerPolicy, Submission};
//!
//! let ledger = AttestationLedger::new(registry, reputation, slashing, verifier, time, LedgerPolicy::default());
//! let receipt = ledger.submit(submission)?;
//! if receipt.is_finalized() {
//!     // quorum reached
//! }
//! ```

pub mod domain;
pub mod error;
pub mod ledger;
pub mod metrics;

pub use domain::{
    ConflictRecord, FinalityProof, MerkleProof, OracleAttestation, PayloadGroup, ProofKey,
    Submission, SubmissionOutcome, SubmissionReceipt, MAX_MERKLE_DEPTH,
};
pub use error::{LedgerError, LedgerResult};
pub use ledger::{evidence_id, AttestationLedger, LedgerPolicy};

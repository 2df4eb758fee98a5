//! Attestation entities

use super::merkle::MerkleProof;
use fo_02_signature_verification::AttestationPayload;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, Timestamp};

/// A submission as received from an oracle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    /// Submitting oracle (sender context)
    pub oracle: Address,
    pub payload: AttestationPayload,
    /// Raw signature bytes over the canonical payload
    pub signature: Vec<u8>,
    /// Optional external-state binding, structurally validated only
    pub merkle_proof: MerkleProof,
}

/// An accepted attestation. Immutable once recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleAttestation {
    pub oracle: Address,
    pub signature: Vec<u8>,
    /// Ledger time at acceptance
    pub submitted_at: Timestamp,
    /// Arrival order within the proof
    pub seq: u32,
    pub payload: AttestationPayload,
}

/// A rejected second claim from an oracle that already attested on the key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub oracle: Address,
    pub payload: AttestationPayload,
    pub submitted_at: Timestamp,
    pub evidence_id: Hash,
}

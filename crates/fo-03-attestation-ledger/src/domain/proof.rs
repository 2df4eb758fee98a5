//! Finality proof entity
//!
//! One record per `(chain_id, tx_hash)`. Attestations are append-only and
//! oracle-unique; `status` moves from Pending to Finalized at most once.

use super::attestation::{ConflictRecord, OracleAttestation};
use fo_02_signature_verification::{AttestationPayload, FinalityStatus};
use serde::{Deserialize, Serialize};
use shared_types::{Address, ChainId, Hash, Timestamp};
use std::fmt;

/// Ledger key. Orders by chain id first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProofKey {
    pub chain_id: ChainId,
    pub tx_hash: Hash,
}

impl ProofKey {
    pub fn new(chain_id: ChainId, tx_hash: Hash) -> Self {
        Self { chain_id, tx_hash }
    }

    pub fn of(payload: &AttestationPayload) -> Self {
        Self::new(payload.chain_id, payload.tx_hash)
    }
}

impl fmt::Display for ProofKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_id, shared_types::short_hex(&self.tx_hash))
    }
}

/// Attestations sharing one exact payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayloadGroup {
    pub payload: AttestationPayload,
    /// Members in arrival order
    pub members: Vec<Address>,
}

impl PayloadGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Aggregated attestations and resulting status for one transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalityProof {
    pub chain_id: ChainId,
    pub tx_hash: Hash,
    pub status: FinalityStatus,
    /// Attested finality time; frozen at finalization
    pub timestamp: Timestamp,
    pub sla_target: u64,
    /// Latest reported depth while pending, the quorum's depth once finalized
    pub confirmations: u64,
    pub attestations: Vec<OracleAttestation>,
    /// Rejected conflicting claims, kept for audit
    pub conflicts: Vec<ConflictRecord>,
    pub finalized_at: Option<Timestamp>,
}

impl FinalityProof {
    /// Empty pending record for `key`.
    pub fn pending(key: ProofKey) -> Self {
        Self {
            chain_id: key.chain_id,
            tx_hash: key.tx_hash,
            status: FinalityStatus::Pending,
            timestamp: 0,
            sla_target: 0,
            confirmations: 0,
            attestations: Vec::new(),
            conflicts: Vec::new(),
            finalized_at: None,
        }
    }

    pub fn key(&self) -> ProofKey {
        ProofKey::new(self.chain_id, self.tx_hash)
    }

    pub fn is_finalized(&self) -> bool {
        self.status == FinalityStatus::Finalized
    }

    pub fn attestation_by(&self, oracle: &Address) -> Option<&OracleAttestation> {
        self.attestations.iter().find(|a| &a.oracle == oracle)
    }

    /// Payload the proof currently reports.
    pub fn reported_payload(&self) -> AttestationPayload {
        AttestationPayload {
            tx_hash: self.tx_hash,
            timestamp: self.timestamp,
            status: self.status,
            sla_target: self.sla_target,
            chain_id: self.chain_id,
            confirmations: self.confirmations,
        }
    }

    /// Attestations grouped by identical payload, groups in first-seen order.
    pub fn groups(&self) -> Vec<PayloadGroup> {
        let mut groups: Vec<PayloadGroup> = Vec::new();
        for attestation in &self.attestations {
            match groups.iter_mut().find(|g| g.payload == attestation.payload) {
                Some(group) => group.members.push(attestation.oracle),
                None => groups.push(PayloadGroup {
                    payload: attestation.payload,
                    members: vec![attestation.oracle],
                }),
            }
        }
        groups
    }

    /// Size of the largest mutually consistent group.
    pub fn consistent_count(&self) -> usize {
        self.groups().iter().map(PayloadGroup::len).max().unwrap_or(0)
    }

    /// The group whose claim was frozen at finalization.
    pub fn winning_group(&self) -> Option<PayloadGroup> {
        if !self.is_finalized() {
            return None;
        }
        let reported = self.reported_payload();
        self.groups().into_iter().find(|g| g.payload == reported)
    }

    /// Oracles whose retained attestation disagrees with the finalized claim.
    pub fn dissenters(&self) -> Vec<&OracleAttestation> {
        if !self.is_finalized() {
            return Vec::new();
        }
        let reported = self.reported_payload();
        self.attestations
            .iter()
            .filter(|a| a.payload != reported)
            .collect()
    }

    /// Freeze the proof to `payload`.
    pub(crate) fn finalize(&mut self, payload: &AttestationPayload, at: Timestamp) {
        self.status = FinalityStatus::Finalized;
        self.timestamp = payload.timestamp;
        self.sla_target = payload.sla_target;
        self.confirmations = payload.confirmations;
        self.finalized_at = Some(at);
    }
}

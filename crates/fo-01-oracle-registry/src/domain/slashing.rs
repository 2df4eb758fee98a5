//! Slashing domain types
//!
//! Evidence carries a content-derived id so that replaying the same offending
//! submission never slashes twice.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, Wei};

/// Why an oracle is being penalised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MisbehaviorReason {
    /// Same key attested twice with different claims
    ConflictingAttestation,
    /// Signature valid but recovered to a different registered oracle
    InvalidSignatureReplay,
    /// Attestation outside the group that won quorum
    InconsistentWithQuorum,
}

impl MisbehaviorReason {
    /// Stable one-byte tag used in evidence ids.
    pub fn tag(&self) -> u8 {
        match self {
            Self::ConflictingAttestation => 1,
            Self::InvalidSignatureReplay => 2,
            Self::InconsistentWithQuorum => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConflictingAttestation => "conflicting_attestation",
            Self::InvalidSignatureReplay => "invalid_signature_replay",
            Self::InconsistentWithQuorum => "inconsistent_with_quorum",
        }
    }
}

/// Evidence handed to the slashing engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MisbehaviorEvidence {
    /// Content hash identifying the offending submission
    pub evidence_id: Hash,
    /// Offending oracle
    pub oracle: Address,
    pub reason: MisbehaviorReason,
}

/// Effect of a single stake reduction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlashApplied {
    /// Amount actually removed (floored at the remaining stake)
    pub taken: Wei,
    pub stake_after: Wei,
    /// Whether this slash dropped the oracle below the minimum stake
    pub deactivated: bool,
}

/// Audit record of an executed slash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlashRecord {
    pub evidence_id: Hash,
    pub oracle: Address,
    pub reason: MisbehaviorReason,
    pub amount_requested: Wei,
    pub amount_taken: Wei,
    pub stake_after: Wei,
    pub deactivated: bool,
    pub reputation_after: u32,
}

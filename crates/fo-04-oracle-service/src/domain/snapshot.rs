//! Engine snapshot
//!
//! Everything needed to rebuild the engine after a restart. Encoded with
//! bincode; the leading version is checked before anything else is trusted.

use crate::error::{SnapshotError, SnapshotResult};
use fo_01_oracle_registry::{Oracle, Parameters, SlashRecord};
use fo_03_attestation_ledger::FinalityProof;
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub parameters: Parameters,
    /// Ordered by first admission
    pub oracles: Vec<Oracle>,
    /// Ordered by key
    pub proofs: Vec<FinalityProof>,
    /// In execution order
    pub slash_log: Vec<SlashRecord>,
}

impl Snapshot {
    pub fn encode(&self) -> SnapshotResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| SnapshotError::Encoding(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> SnapshotResult<Self> {
        let snapshot: Self =
            bincode::deserialize(bytes).map_err(|e| SnapshotError::Encoding(e.to_string()))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }
}

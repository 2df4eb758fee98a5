//! JSON renderings of engine entities (`--json`).

use fo_01_oracle_registry::Oracle;
use fo_03_attestation_ledger::FinalityProof;
use serde::Serialize;
use serde_with::{hex::Hex, serde_as};
use shared_types::{Address, ChainId, Hash, Timestamp, Wei};

#[serde_as]
#[derive(Debug, Serialize)]
pub struct OracleView {
    #[serde_as(as = "Hex")]
    pub address: Address,
    pub stake: Wei,
    pub is_active: bool,
    pub reputation: u32,
}

impl From<&Oracle> for OracleView {
    fn from(oracle: &Oracle) -> Self {
        Self {
            address: oracle.address,
            stake: oracle.stake,
            is_active: oracle.is_active,
            reputation: oracle.reputation,
        }
    }
}

#[serde_as]
#[derive(Debug, Serialize)]
pub struct AttestationView {
    #[serde_as(as = "Hex")]
    pub oracle: Address,
    pub seq: u32,
    pub submitted_at: Timestamp,
    pub confirmations: u64,
    #[serde_as(as = "Hex")]
    pub signature: Vec<u8>,
}

#[serde_as]
#[derive(Debug, Serialize)]
pub struct ProofView {
    pub chain_id: ChainId,
    #[serde_as(as = "Hex")]
    pub tx_hash: Hash,
    pub status: &'static str,
    pub timestamp: Timestamp,
    pub sla_target: u64,
    pub confirmations: u64,
    pub finalized_at: Option<Timestamp>,
    pub attestations: Vec<AttestationView>,
    pub conflicts: usize,
}

impl From<&FinalityProof> for ProofView {
    fn from(proof: &FinalityProof) -> Self {
        Self {
            chain_id: proof.chain_id,
            tx_hash: proof.tx_hash,
            status: if proof.is_finalized() { "finalized" } else { "pending" },
            timestamp: proof.timestamp,
            sla_target: proof.sla_target,
            confirmations: proof.confirmations,
            finalized_at: proof.finalized_at,
            attestations: proof
                .attestations
                .iter()
                .map(|a| AttestationView {
                    oracle: a.oracle,
                    seq: a.seq,
                    submitted_at: a.submitted_at,
                    confirmations: a.payload.confirmations,
                    signature: a.signature.clone(),
                })
                .collect(),
            conflicts: proof.conflicts.len(),
        }
    }
}

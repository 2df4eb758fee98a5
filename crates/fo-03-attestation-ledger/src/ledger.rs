//! Attestation Ledger
//!
//! Per-key aggregation of oracle attestations with the quorum state machine.
//!
//! Each `(chain_id, tx_hash)` key owns a writer mutex and an atomically
//! swapped snapshot of its proof. Writers to one key are serialized; writers
//! to distinct keys never contend; readers load the last published snapshot
//! without taking any lock.

use crate::domain::{
    ConflictRecord, FinalityProof, OracleAttestation, PayloadGroup, ProofKey, Submission,
    SubmissionOutcome, SubmissionReceipt,
};
use crate::error::{LedgerError, LedgerResult};
use crate::metrics;
use arc_swap::ArcSwapOption;
use dashmap::DashMap;
use fo_01_oracle_registry::{
    MisbehaviorEvidence, MisbehaviorReason, OracleRegistry, ReputationTracker, SlashRecord,
    SlashingEngine,
};
use fo_02_signature_verification::{
    keccak256, AttestationPayload, AttestationVerifier, FinalityStatus, PAYLOAD_LENGTH,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared_types::{short_hex, Address, ChainId, Hash, TimeSource};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Penalty policy applied at finalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerPolicy {
    /// Slash oracles whose attestation disagrees with the finalized quorum
    pub slash_dissenters: bool,
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self {
            slash_dissenters: true,
        }
    }
}

/// Content id of a misbehaviour: one slash per distinct offending submission.
pub fn evidence_id(oracle: &Address, payload: &AttestationPayload, reason: MisbehaviorReason) -> Hash {
    let mut buf = Vec::with_capacity(20 + 8 + 32 + PAYLOAD_LENGTH + 1);
    buf.extend_from_slice(oracle);
    buf.extend_from_slice(&payload.chain_id.to_be_bytes());
    buf.extend_from_slice(&payload.tx_hash);
    buf.extend_from_slice(&payload.encode());
    buf.push(reason.tag());
    keccak256(&buf)
}

struct ProofCell {
    writer: Mutex<()>,
    /// `None` until the first attestation is accepted
    published: ArcSwapOption<FinalityProof>,
}

impl ProofCell {
    fn new(proof: Option<FinalityProof>) -> Self {
        Self {
            writer: Mutex::new(()),
            published: ArcSwapOption::new(proof.map(Arc::new)),
        }
    }
}

/// Ledger of finality proofs.
pub struct AttestationLedger {
    registry: Arc<OracleRegistry>,
    reputation: Arc<ReputationTracker>,
    slashing: Arc<SlashingEngine>,
    verifier: Arc<dyn AttestationVerifier>,
    time: Arc<dyn TimeSource>,
    policy: LedgerPolicy,
    proofs: DashMap<ProofKey, Arc<ProofCell>>,
    /// Chains on which a transaction hash has a published proof
    by_tx: DashMap<Hash, BTreeSet<ChainId>>,
    /// Pending keys on which an oracle produced a conflict
    unresolved: DashMap<Address, BTreeSet<ProofKey>>,
}

impl AttestationLedger {
    pub fn new(
        registry: Arc<OracleRegistry>,
        reputation: Arc<ReputationTracker>,
        slashing: Arc<SlashingEngine>,
        verifier: Arc<dyn AttestationVerifier>,
        time: Arc<dyn TimeSource>,
        policy: LedgerPolicy,
    ) -> Self {
        Self {
            registry,
            reputation,
            slashing,
            verifier,
            time,
            policy,
            proofs: DashMap::new(),
            by_tx: DashMap::new(),
            unresolved: DashMap::new(),
        }
    }

    pub fn policy(&self) -> LedgerPolicy {
        self.policy
    }

    // =========================================================================
    // SUBMISSION
    // =========================================================================

    /// Record an attestation and advance the key's quorum state.
    ///
    /// Every `Err` is returned before the ledger is modified. Conflicts and
    /// signature replays are successful outcomes that carry a slash.
    pub fn submit(&self, submission: Submission) -> LedgerResult<SubmissionReceipt> {
        let Submission {
            oracle,
            payload,
            signature,
            merkle_proof,
        } = submission;
        let key = ProofKey::of(&payload);

        if !self.registry.is_active(&oracle) {
            metrics::record_attestation_rejected("oracle_not_active");
            warn!("[fo-03] Rejected {}: oracle {} not active", key, short_hex(&oracle));
            return Err(LedgerError::OracleNotActive { oracle });
        }

        // Structural checks first: a rejected submission never reaches slashing.
        if let Err(e) = merkle_proof.validate() {
            metrics::record_attestation_rejected("malformed_proof");
            warn!("[fo-03] Rejected {}: {}", key, e);
            return Err(e);
        }

        match self.verifier.recover(&payload, &signature) {
            Some(signer) if signer == oracle => {}
            Some(signer) if self.registry.contains(&signer) => {
                return self.on_signature_replay(oracle, signer, &payload);
            }
            _ => {
                metrics::record_attestation_rejected("bad_signature");
                warn!("[fo-03] Rejected {}: bad signature from {}", key, short_hex(&oracle));
                return Err(LedgerError::BadSignature { oracle });
            }
        }

        let cell = self.cell(key);
        let _writer = cell.writer.lock();
        let current = cell.published.load_full();

        if let Some(proof) = current.as_deref() {
            if proof.is_finalized() {
                debug!("[fo-03] {} already finalized, ignoring {}", key, short_hex(&oracle));
                return Ok(SubmissionReceipt::new(
                    SubmissionOutcome::AlreadyFinalized,
                    Some(proof.clone()),
                ));
            }
            if let Some(prior) = proof.attestation_by(&oracle) {
                if prior.payload == payload {
                    debug!("[fo-03] Duplicate attestation on {} from {}", key, short_hex(&oracle));
                    return Ok(SubmissionReceipt::new(
                        SubmissionOutcome::Duplicate,
                        Some(proof.clone()),
                    ));
                }
                return self.on_conflict(&cell, proof, oracle, payload);
            }
        }

        let now = self.time.now();
        let mut next = current
            .as_deref()
            .cloned()
            .unwrap_or_else(|| FinalityProof::pending(key));
        let seq = next.attestations.len() as u32;
        next.attestations.push(OracleAttestation {
            oracle,
            signature,
            submitted_at: now,
            seq,
            payload,
        });
        next.timestamp = payload.timestamp;
        next.sla_target = payload.sla_target;
        next.confirmations = payload.confirmations;

        let required = self.registry.parameters().current().required_signatures as usize;
        let winner = next
            .groups()
            .into_iter()
            .find(|g| g.payload.status == FinalityStatus::Finalized && g.len() >= required);

        if let Err(e) = self.check_invariants(&next, winner.as_ref()) {
            error!("[fo-03] Aborting submission on {}: {}", key, e);
            return Err(e);
        }
        if let Some(group) = &winner {
            next.finalize(&group.payload, now);
        }

        let next = Arc::new(next);
        cell.published.store(Some(next.clone()));
        if current.is_none() {
            self.by_tx.entry(key.tx_hash).or_default().insert(key.chain_id);
        }

        metrics::record_attestation_accepted();
        if let Err(e) = self.reputation.on_accepted(&oracle) {
            error!("[fo-03] Reputation update failed for {}: {}", short_hex(&oracle), e);
        }
        debug!(
            "[fo-03] Accepted attestation {} on {} from {}",
            seq,
            key,
            short_hex(&oracle)
        );

        if let Some(group) = winner {
            self.on_finalized(&next, &group);
        }

        Ok(SubmissionReceipt::new(
            SubmissionOutcome::Accepted,
            Some((*next).clone()),
        ))
    }

    fn cell(&self, key: ProofKey) -> Arc<ProofCell> {
        self.proofs
            .entry(key)
            .or_insert_with(|| Arc::new(ProofCell::new(None)))
            .clone()
    }

    /// Same oracle, same key, different claim. The claim is not counted.
    fn on_conflict(
        &self,
        cell: &ProofCell,
        proof: &FinalityProof,
        oracle: Address,
        payload: AttestationPayload,
    ) -> LedgerResult<SubmissionReceipt> {
        let key = proof.key();
        metrics::record_conflict();

        let reason = MisbehaviorReason::ConflictingAttestation;
        let record = self.slash(oracle, &payload, reason)?;
        let slashed = record.is_some();

        let state = match record {
            Some(record) => {
                let mut next = proof.clone();
                next.conflicts.push(ConflictRecord {
                    oracle,
                    payload,
                    submitted_at: self.time.now(),
                    evidence_id: record.evidence_id,
                });
                self.unresolved.entry(oracle).or_default().insert(key);
                cell.published.store(Some(Arc::new(next.clone())));
                next
            }
            None => proof.clone(),
        };

        warn!(
            "[fo-03] Conflicting attestation on {} from {} (slashed: {})",
            key,
            short_hex(&oracle),
            slashed
        );
        Ok(SubmissionReceipt::new(
            SubmissionOutcome::Conflict { slashed },
            Some(state),
        ))
    }

    /// Signature is valid but belongs to another registered oracle.
    fn on_signature_replay(
        &self,
        oracle: Address,
        signer: Address,
        payload: &AttestationPayload,
    ) -> LedgerResult<SubmissionReceipt> {
        let key = ProofKey::of(payload);
        let record = self.slash(oracle, payload, MisbehaviorReason::InvalidSignatureReplay)?;
        let slashed = record.is_some();

        warn!(
            "[fo-03] Oracle {} replayed a signature of {} on {} (slashed: {})",
            short_hex(&oracle),
            short_hex(&signer),
            key,
            slashed
        );
        Ok(SubmissionReceipt::new(
            SubmissionOutcome::SignatureReplay { slashed },
            self.get_proof(&key).map(|p| (*p).clone()),
        ))
    }

    fn on_finalized(&self, proof: &FinalityProof, group: &PayloadGroup) {
        let key = proof.key();
        metrics::record_proof_finalized();
        info!(
            "[fo-03] Proof {} finalized by {} of {} attestations (confirmations {}/{})",
            key,
            group.len(),
            proof.attestations.len(),
            proof.confirmations,
            proof.sla_target
        );

        if group.payload.misses_sla() {
            for member in &group.members {
                if let Err(e) = self.reputation.on_missed_sla(member) {
                    error!("[fo-03] Missed-SLA penalty failed for {}: {}", short_hex(member), e);
                }
            }
        }

        if self.policy.slash_dissenters {
            for dissent in proof.dissenters() {
                let reason = MisbehaviorReason::InconsistentWithQuorum;
                if let Err(e) = self.slash(dissent.oracle, &dissent.payload, reason) {
                    error!(
                        "[fo-03] Dissent slash failed for {} on {}: {}",
                        short_hex(&dissent.oracle),
                        key,
                        e
                    );
                }
            }
        }

        for conflict in &proof.conflicts {
            if let Some(mut keys) = self.unresolved.get_mut(&conflict.oracle) {
                keys.remove(&key);
            }
            self.unresolved
                .remove_if(&conflict.oracle, |_, keys| keys.is_empty());
        }
    }

    fn slash(
        &self,
        oracle: Address,
        payload: &AttestationPayload,
        reason: MisbehaviorReason,
    ) -> LedgerResult<Option<SlashRecord>> {
        let evidence = MisbehaviorEvidence {
            evidence_id: evidence_id(&oracle, payload, reason),
            oracle,
            reason,
        };
        let record = self.slashing.on_misbehavior(evidence)?;
        if let Some(record) = &record {
            metrics::record_slash(reason.as_str(), record.deactivated);
        }
        Ok(record)
    }

    fn check_invariants(
        &self,
        proof: &FinalityProof,
        winner: Option<&PayloadGroup>,
    ) -> LedgerResult<()> {
        let key = proof.key();
        let mut seen = HashSet::with_capacity(proof.attestations.len());
        for (index, attestation) in proof.attestations.iter().enumerate() {
            if !seen.insert(attestation.oracle) {
                return Err(LedgerError::InvariantViolation {
                    reason: format!(
                        "{} holds two attestations from {}",
                        key,
                        short_hex(&attestation.oracle)
                    ),
                });
            }
            if ProofKey::of(&attestation.payload) != key || attestation.seq as usize != index {
                return Err(LedgerError::InvariantViolation {
                    reason: format!("{} attestation {} is misplaced", key, index),
                });
            }
        }

        if let Some(group) = winner {
            let max = self.registry.parameters().current().max_oracles as usize;
            if group.len() > max {
                return Err(LedgerError::InvariantViolation {
                    reason: format!(
                        "{} quorum group of {} exceeds max oracles {}",
                        key,
                        group.len(),
                        max
                    ),
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Last published proof for `key`. Never blocks.
    pub fn get_proof(&self, key: &ProofKey) -> Option<Arc<FinalityProof>> {
        self.proofs.get(key).and_then(|cell| cell.published.load_full())
    }

    pub fn verify_finality(&self, key: &ProofKey) -> bool {
        self.get_proof(key)
            .map(|proof| proof.is_finalized())
            .unwrap_or(false)
    }

    /// Every chain's proof for `tx_hash`, ordered by chain id.
    pub fn proofs_for_tx(&self, tx_hash: &Hash) -> Vec<Arc<FinalityProof>> {
        let chains: Vec<ChainId> = match self.by_tx.get(tx_hash) {
            Some(chains) => chains.iter().copied().collect(),
            None => return Vec::new(),
        };
        chains
            .into_iter()
            .filter_map(|chain_id| self.get_proof(&ProofKey::new(chain_id, *tx_hash)))
            .collect()
    }

    /// All published proofs ordered by key.
    pub fn all_proofs(&self) -> Vec<FinalityProof> {
        let mut proofs: Vec<FinalityProof> = self
            .proofs
            .iter()
            .filter_map(|cell| cell.published.load_full())
            .map(|proof| (*proof).clone())
            .collect();
        proofs.sort_by_key(FinalityProof::key);
        proofs
    }

    pub fn proof_count(&self) -> usize {
        self.proofs
            .iter()
            .filter(|cell| cell.published.load().is_some())
            .count()
    }

    pub fn has_unresolved_conflicts(&self, oracle: &Address) -> bool {
        self.unresolved
            .get(oracle)
            .map(|keys| !keys.is_empty())
            .unwrap_or(false)
    }

    pub fn unresolved_conflicts(&self, oracle: &Address) -> Vec<ProofKey> {
        self.unresolved
            .get(oracle)
            .map(|keys| keys.iter().copied().collect())
            .unwrap_or_default()
    }

    // =========================================================================
    // RESTORE
    // =========================================================================

    /// Replace the ledger contents, re-checking every proof first.
    ///
    /// Attestations must reference oracles already present in the registry.
    pub fn restore(&self, proofs: Vec<FinalityProof>) -> LedgerResult<()> {
        let mut keys = HashSet::with_capacity(proofs.len());
        for proof in &proofs {
            let key = proof.key();
            if !keys.insert(key) {
                return Err(LedgerError::InvariantViolation {
                    reason: format!("duplicate proof {}", key),
                });
            }
            self.verify_restored(proof)?;
        }

        self.proofs.clear();
        self.by_tx.clear();
        self.unresolved.clear();
        for proof in proofs {
            let key = proof.key();
            if !proof.is_finalized() {
                for conflict in &proof.conflicts {
                    self.unresolved.entry(conflict.oracle).or_default().insert(key);
                }
            }
            self.by_tx.entry(key.tx_hash).or_default().insert(key.chain_id);
            self.proofs.insert(key, Arc::new(ProofCell::new(Some(proof))));
        }
        info!("[fo-03] Restored {} proofs", keys.len());
        Ok(())
    }

    fn verify_restored(&self, proof: &FinalityProof) -> LedgerResult<()> {
        let key = proof.key();
        let violation = |reason: String| LedgerError::InvariantViolation {
            reason: format!("{}: {}", key, reason),
        };

        if proof.attestations.is_empty() {
            return Err(violation("no attestations".into()));
        }
        for attestation in &proof.attestations {
            if !self.registry.contains(&attestation.oracle) {
                return Err(violation(format!(
                    "unknown oracle {}",
                    short_hex(&attestation.oracle)
                )));
            }
        }

        let winner = if proof.is_finalized() {
            let group = proof
                .winning_group()
                .ok_or_else(|| violation("finalized without a matching group".into()))?;
            if proof.finalized_at.is_none() {
                return Err(violation("finalized without a finalization time".into()));
            }
            Some(group)
        } else {
            if proof.finalized_at.is_some() {
                return Err(violation("pending proof carries a finalization time".into()));
            }
            None
        };
        self.check_invariants(proof, winner.as_ref())
    }
}

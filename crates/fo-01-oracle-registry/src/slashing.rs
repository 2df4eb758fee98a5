//! Slashing Engine
//!
//! Executes stake penalties for misbehaviour evidence. Each evidence id is
//! slashed at most once, so resubmitting the same offending attestation is a
//! no-op.

use crate::domain::{MisbehaviorEvidence, SlashRecord};
use crate::error::RegistryResult;
use crate::registry::OracleRegistry;
use crate::reputation::ReputationTracker;
use dashmap::DashMap;
use parking_lot::Mutex;
use shared_types::{short_hex, Address, Hash};
use std::sync::Arc;
use tracing::warn;

pub struct SlashingEngine {
    registry: Arc<OracleRegistry>,
    reputation: Arc<ReputationTracker>,
    /// Evidence ids already slashed
    seen: DashMap<Hash, ()>,
    /// Append-only audit log
    records: Mutex<Vec<SlashRecord>>,
}

impl SlashingEngine {
    pub fn new(registry: Arc<OracleRegistry>, reputation: Arc<ReputationTracker>) -> Self {
        Self {
            registry,
            reputation,
            seen: DashMap::new(),
            records: Mutex::new(Vec::new()),
        }
    }

    /// Slash `evidence.oracle` by the current slashing amount.
    ///
    /// Returns `None` when this evidence id was already slashed.
    pub fn on_misbehavior(&self, evidence: MisbehaviorEvidence) -> RegistryResult<Option<SlashRecord>> {
        // Claim the id first so concurrent duplicates cannot both slash.
        if self.seen.insert(evidence.evidence_id, ()).is_some() {
            return Ok(None);
        }

        let amount = self.registry.parameters().current().slashing_amount;
        let applied = match self.registry.slash(&evidence.oracle, amount) {
            Ok(applied) => applied,
            Err(e) => {
                self.seen.remove(&evidence.evidence_id);
                return Err(e);
            }
        };
        let reputation_after = self.reputation.on_conflict(&evidence.oracle)?;

        let record = SlashRecord {
            evidence_id: evidence.evidence_id,
            oracle: evidence.oracle,
            reason: evidence.reason,
            amount_requested: amount,
            amount_taken: applied.taken,
            stake_after: applied.stake_after,
            deactivated: applied.deactivated,
            reputation_after,
        };

        warn!(
            "[fo-01] Slashed oracle {} by {} wei for {} (stake now {})",
            short_hex(&evidence.oracle),
            applied.taken,
            evidence.reason.as_str(),
            applied.stake_after
        );

        self.records.lock().push(record.clone());
        Ok(Some(record))
    }

    pub fn is_slashed(&self, evidence_id: &Hash) -> bool {
        self.seen.contains_key(evidence_id)
    }

    /// Audit log in execution order.
    pub fn records(&self) -> Vec<SlashRecord> {
        self.records.lock().clone()
    }

    pub fn slash_count_for(&self, oracle: &Address) -> usize {
        self.records
            .lock()
            .iter()
            .filter(|r| &r.oracle == oracle)
            .count()
    }

    /// Replace the audit log, rebuilding the evidence index from it.
    pub fn restore(&self, records: Vec<SlashRecord>) {
        self.seen.clear();
        for record in &records {
            self.seen.insert(record.evidence_id, ());
        }
        *self.records.lock() = records;
    }
}

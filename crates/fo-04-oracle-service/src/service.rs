//! Finality Oracle Service
//!
//! Wires the registry, ledger and penalty engines behind the inbound ports
//! and owns the snapshot boundary.

use crate::access::{AccessController, OwnerCapability};
use crate::config::EngineConfig;
use crate::domain::{Snapshot, SubmitAttestationRequest, SNAPSHOT_VERSION};
use crate::error::{
    AdmissionError, AdmissionResult, ServiceResult, SnapshotError, SubmissionResult,
};
use crate::ports::inbound::{FinalityOracleApi, OracleAdminApi};
use crate::ports::outbound::SnapshotStore;
use async_trait::async_trait;
use fo_01_oracle_registry::{
    Oracle, OracleRegistry, ParameterStore, Parameters, ReputationTracker, SlashRecord,
    SlashingEngine,
};
use fo_02_signature_verification::{AttestationVerifier, EcdsaAttestationVerifier};
use fo_03_attestation_ledger::{AttestationLedger, FinalityProof, ProofKey, SubmissionReceipt};
use parking_lot::RwLock;
use shared_types::{short_hex, Address, ChainId, Hash, TimeSource, Wei};
use std::sync::Arc;
use tracing::{info, warn};

/// Crate version reported to clients.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// The finality oracle engine.
pub struct FinalityOracleService {
    access: AccessController,
    parameters: Arc<ParameterStore>,
    registry: Arc<OracleRegistry>,
    slashing: Arc<SlashingEngine>,
    ledger: AttestationLedger,
    /// Operations hold it shared; snapshots hold it exclusively
    quiesce: RwLock<()>,
}

impl FinalityOracleService {
    /// Fresh engine with secp256k1 verification.
    pub fn new(config: &EngineConfig, time: Arc<dyn TimeSource>) -> ServiceResult<Self> {
        Self::with_verifier(config, Arc::new(EcdsaAttestationVerifier::new()), time)
    }

    /// Fresh engine with a custom signature scheme.
    pub fn with_verifier(
        config: &EngineConfig,
        verifier: Arc<dyn AttestationVerifier>,
        time: Arc<dyn TimeSource>,
    ) -> ServiceResult<Self> {
        config.validate()?;
        Self::assemble(config, config.parameters, verifier, time)
    }

    fn assemble(
        config: &EngineConfig,
        parameters: Parameters,
        verifier: Arc<dyn AttestationVerifier>,
        time: Arc<dyn TimeSource>,
    ) -> ServiceResult<Self> {
        let owner = config.owner_address()?;
        let parameters = Arc::new(
            ParameterStore::new(parameters)
                .map_err(|e| SnapshotError::Invariant(e.to_string()))?,
        );
        let registry = Arc::new(OracleRegistry::new(parameters.clone(), config.reputation));
        let reputation = Arc::new(ReputationTracker::new(registry.clone()));
        let slashing = Arc::new(SlashingEngine::new(registry.clone(), reputation.clone()));
        let ledger = AttestationLedger::new(
            registry.clone(),
            reputation,
            slashing.clone(),
            verifier,
            time,
            config.policy,
        );

        Ok(Self {
            access: AccessController::new(owner),
            parameters,
            registry,
            slashing,
            ledger,
            quiesce: RwLock::new(()),
        })
    }

    /// Rebuild an engine from `snapshot`, re-checking every invariant.
    ///
    /// Parameters come from the snapshot; everything else from `config`.
    pub fn from_snapshot(
        config: &EngineConfig,
        snapshot: Snapshot,
        time: Arc<dyn TimeSource>,
    ) -> ServiceResult<Self> {
        config.validate()?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            }
            .into());
        }

        let service = Self::assemble(
            config,
            snapshot.parameters,
            Arc::new(EcdsaAttestationVerifier::new()),
            time,
        )?;
        let invariant = |e: String| SnapshotError::Invariant(e);

        service
            .registry
            .restore(snapshot.oracles)
            .map_err(|e| invariant(e.to_string()))?;
        if let Some(record) = snapshot
            .slash_log
            .iter()
            .find(|r| !service.registry.contains(&r.oracle))
        {
            return Err(invariant(format!(
                "slash record for unknown oracle {}",
                short_hex(&record.oracle)
            ))
            .into());
        }
        service.slashing.restore(snapshot.slash_log);
        service
            .ledger
            .restore(snapshot.proofs)
            .map_err(|e| invariant(e.to_string()))?;

        Ok(service)
    }

    /// Restore from `store`, or start fresh when it is empty.
    pub fn open(
        config: &EngineConfig,
        store: &dyn SnapshotStore,
        time: Arc<dyn TimeSource>,
    ) -> ServiceResult<Self> {
        match store.load()? {
            Some(snapshot) => Self::from_snapshot(config, snapshot, time),
            None => {
                info!("[fo-04] No snapshot found, starting empty engine");
                Self::new(config, time)
            }
        }
    }

    /// Consistent copy of the whole engine state.
    pub fn snapshot(&self) -> Snapshot {
        let _quiet = self.quiesce.write();
        Snapshot {
            version: SNAPSHOT_VERSION,
            parameters: self.parameters.current(),
            oracles: self.registry.all(),
            proofs: self.ledger.all_proofs(),
            slash_log: self.slashing.records(),
        }
    }

    pub fn persist(&self, store: &dyn SnapshotStore) -> ServiceResult<()> {
        store.save(&self.snapshot())?;
        Ok(())
    }

    /// Issue an owner capability for `caller`.
    pub fn authorize(&self, caller: &Address) -> AdmissionResult<OwnerCapability> {
        self.access.authorize(caller)
    }

    pub fn access(&self) -> &AccessController {
        &self.access
    }

    pub fn registry(&self) -> &Arc<OracleRegistry> {
        &self.registry
    }

    pub fn ledger(&self) -> &AttestationLedger {
        &self.ledger
    }

    pub fn slash_log(&self) -> Vec<SlashRecord> {
        self.slashing.records()
    }

    fn admin<T, F>(&self, cap: &OwnerCapability, op: F) -> AdmissionResult<T>
    where
        F: FnOnce() -> AdmissionResult<T>,
    {
        self.access.check(cap)?;
        let _op = self.quiesce.read();
        op()
    }
}

#[async_trait]
impl FinalityOracleApi for FinalityOracleService {
    async fn submit_attestation(
        &self,
        request: SubmitAttestationRequest,
    ) -> SubmissionResult<SubmissionReceipt> {
        let oracle = request.oracle;
        let submission = request.into_submission().map_err(|e| {
            warn!("[fo-04] Rejected request from {}: {}", short_hex(&oracle), e);
            e
        })?;

        let _op = self.quiesce.read();
        let receipt = self.ledger.submit(submission)?;
        if receipt.outcome.is_warning() {
            warn!(
                "[fo-04] Submission from {} accepted with warning: {}",
                short_hex(&oracle),
                receipt.outcome.as_str()
            );
        }
        Ok(receipt)
    }

    async fn query_proof(&self, tx_hash: Hash) -> Vec<FinalityProof> {
        self.ledger
            .proofs_for_tx(&tx_hash)
            .into_iter()
            .map(|proof| (*proof).clone())
            .collect()
    }

    async fn query_proof_on(&self, chain_id: ChainId, tx_hash: Hash) -> Option<FinalityProof> {
        self.ledger
            .get_proof(&ProofKey::new(chain_id, tx_hash))
            .map(|proof| (*proof).clone())
    }

    async fn query_finalized(&self, tx_hash: Hash) -> bool {
        self.ledger
            .proofs_for_tx(&tx_hash)
            .iter()
            .any(|proof| proof.is_finalized())
    }

    async fn verify_finality(&self, chain_id: ChainId, tx_hash: Hash) -> bool {
        self.ledger.verify_finality(&ProofKey::new(chain_id, tx_hash))
    }

    async fn list_active_oracles(&self) -> Vec<Address> {
        self.registry.list_active()
    }

    async fn get_oracle(&self, address: Address) -> Option<Oracle> {
        self.registry.get(&address)
    }

    async fn parameters(&self) -> Parameters {
        self.parameters.current()
    }
}

#[async_trait]
impl OracleAdminApi for FinalityOracleService {
    async fn admit_oracle(
        &self,
        cap: &OwnerCapability,
        address: Address,
        stake: Wei,
    ) -> AdmissionResult<Oracle> {
        self.admin(cap, || Ok(self.registry.admit(address, stake)?))
    }

    async fn remove_oracle(&self, cap: &OwnerCapability, address: Address) -> AdmissionResult<Oracle> {
        self.admin(cap, || {
            let pending = self.ledger.unresolved_conflicts(&address);
            if !pending.is_empty() {
                warn!(
                    "[fo-04] Refusing to remove {}: conflicts pending on {} proofs",
                    short_hex(&address),
                    pending.len()
                );
                return Err(AdmissionError::OracleHasUnresolvedConflicts {
                    address,
                    pending: pending.len(),
                });
            }
            Ok(self.registry.remove(&address)?)
        })
    }

    async fn set_required_signatures(
        &self,
        cap: &OwnerCapability,
        required: u32,
    ) -> AdmissionResult<Parameters> {
        self.admin(cap, || {
            let params = self.registry.set_required_signatures(required)?;
            info!("[fo-04] required_signatures set to {}", required);
            Ok(params)
        })
    }

    async fn set_max_oracles(&self, cap: &OwnerCapability, max: u32) -> AdmissionResult<Parameters> {
        self.admin(cap, || {
            let params = self.registry.set_max_oracles(max)?;
            info!("[fo-04] max_oracles set to {}", max);
            Ok(params)
        })
    }

    async fn set_min_stake(
        &self,
        cap: &OwnerCapability,
        min_stake: Wei,
    ) -> AdmissionResult<(Parameters, Vec<Address>)> {
        self.admin(cap, || {
            let result = self.registry.set_min_stake(min_stake)?;
            info!("[fo-04] min_stake set to {} wei", min_stake);
            Ok(result)
        })
    }

    async fn set_slashing_amount(
        &self,
        cap: &OwnerCapability,
        amount: Wei,
    ) -> AdmissionResult<Parameters> {
        self.admin(cap, || {
            let params = self.registry.set_slashing_amount(amount)?;
            info!("[fo-04] slashing_amount set to {} wei", amount);
            Ok(params)
        })
    }
}

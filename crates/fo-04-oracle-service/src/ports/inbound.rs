//! Driving Ports (API - Inbound)

use crate::access::OwnerCapability;
use crate::domain::SubmitAttestationRequest;
use crate::error::{AdmissionResult, SubmissionResult};
use async_trait::async_trait;
use fo_01_oracle_registry::{Oracle, Parameters};
use fo_03_attestation_ledger::{FinalityProof, SubmissionReceipt};
use shared_types::{Address, ChainId, Hash, Wei};

/// Client-facing API: submissions and queries.
#[async_trait]
pub trait FinalityOracleApi: Send + Sync {
    /// Validate and record an attestation.
    ///
    /// Conflicts and signature replays are returned as `Ok` with a warning
    /// outcome; they still slash the offending oracle.
    async fn submit_attestation(
        &self,
        request: SubmitAttestationRequest,
    ) -> SubmissionResult<SubmissionReceipt>;

    /// Proofs for `tx_hash` on every chain, ordered by chain id.
    /// Empty when the hash was never attested.
    async fn query_proof(&self, tx_hash: Hash) -> Vec<FinalityProof>;

    /// Proof for one `(chain_id, tx_hash)` key.
    async fn query_proof_on(&self, chain_id: ChainId, tx_hash: Hash) -> Option<FinalityProof>;

    /// Whether any chain's proof for `tx_hash` is finalized.
    async fn query_finalized(&self, tx_hash: Hash) -> bool;

    async fn verify_finality(&self, chain_id: ChainId, tx_hash: Hash) -> bool;

    /// Active oracles in order of first admission.
    async fn list_active_oracles(&self) -> Vec<Address>;

    async fn get_oracle(&self, address: Address) -> Option<Oracle>;

    async fn parameters(&self) -> Parameters;
}

/// Owner-only administration. Every call requires a capability from the
/// service's access controller.
#[async_trait]
pub trait OracleAdminApi: Send + Sync {
    async fn admit_oracle(
        &self,
        cap: &OwnerCapability,
        address: Address,
        stake: Wei,
    ) -> AdmissionResult<Oracle>;

    /// Soft-delete; refused while the oracle has unresolved conflicts.
    async fn remove_oracle(&self, cap: &OwnerCapability, address: Address) -> AdmissionResult<Oracle>;

    async fn set_required_signatures(
        &self,
        cap: &OwnerCapability,
        required: u32,
    ) -> AdmissionResult<Parameters>;

    async fn set_max_oracles(&self, cap: &OwnerCapability, max: u32) -> AdmissionResult<Parameters>;

    /// Returns the new parameters and the oracles deactivated by the change.
    async fn set_min_stake(
        &self,
        cap: &OwnerCapability,
        min_stake: Wei,
    ) -> AdmissionResult<(Parameters, Vec<Address>)>;

    async fn set_slashing_amount(
        &self,
        cap: &OwnerCapability,
        amount: Wei,
    ) -> AdmissionResult<Parameters>;
}

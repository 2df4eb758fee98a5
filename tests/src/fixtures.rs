//! # Test Fixtures
//!
//! Builders shared by the integration tests and benchmarks.

use fo_02_signature_verification::{AttestationPayload, AttestationSigner, FinalityStatus};
use fo_03_attestation_ledger::{MerkleProof, Submission};
use fo_04_oracle_service::{
    EngineConfig, FinalityOracleService, OracleAdminApi, SubmitAttestationRequest,
};
use shared_types::{milli_ether, to_hex, Address, FixedTimeSource, Hash, Wei};
use std::sync::Arc;

/// Administrator of every test engine.
pub const OWNER: Address = [0xAA; 20];

/// The transaction hash `H` used throughout.
pub const TX: Hash = [0x48; 32];

pub const TWO_ETH: Wei = milli_ether(2_000);

/// Seconds since the epoch at which test engines start.
pub const GENESIS_TIME: u64 = 1_700_000_000;

pub fn engine_config() -> EngineConfig {
    EngineConfig {
        owner: Some(to_hex(&OWNER)),
        ..Default::default()
    }
}

/// Engine with default parameters and a controllable clock.
pub fn engine() -> (FinalityOracleService, Arc<FixedTimeSource>) {
    engine_with(engine_config())
}

pub fn engine_with(config: EngineConfig) -> (FinalityOracleService, Arc<FixedTimeSource>) {
    let clock = Arc::new(FixedTimeSource::new(GENESIS_TIME));
    let service = FinalityOracleService::new(&config, clock.clone())
        .expect("test configuration is valid");
    (service, clock)
}

/// `n` signers with stable keys `[1; 32]`, `[2; 32]`, ...
pub fn signers(n: u8) -> Vec<AttestationSigner> {
    (1..=n)
        .map(|i| AttestationSigner::from_bytes(&[i; 32]).expect("non-zero scalar"))
        .collect()
}

/// `n` signers with fresh random keys.
pub fn random_signers(n: usize) -> Vec<AttestationSigner> {
    (0..n).map(|_| AttestationSigner::random()).collect()
}

/// `(timestamp=1000, Finalized, slaTarget=12, chainId=1, confirmations)` for `TX`.
pub fn payload(confirmations: u64) -> AttestationPayload {
    payload_for(TX, 1, confirmations)
}

pub fn payload_for(tx_hash: Hash, chain_id: u64, confirmations: u64) -> AttestationPayload {
    AttestationPayload {
        tx_hash,
        timestamp: 1_000,
        status: FinalityStatus::Finalized,
        sla_target: 12,
        chain_id,
        confirmations,
    }
}

/// API request signed by `signer` and submitted in its own name.
pub fn request(signer: &AttestationSigner, payload: &AttestationPayload) -> SubmitAttestationRequest {
    request_as(signer.address(), signer, payload)
}

/// API request submitted by `oracle` carrying `signer`'s signature.
pub fn request_as(
    oracle: Address,
    signer: &AttestationSigner,
    payload: &AttestationPayload,
) -> SubmitAttestationRequest {
    SubmitAttestationRequest {
        oracle,
        tx_hash: payload.tx_hash.to_vec(),
        timestamp: payload.timestamp,
        status: payload.status.as_u8(),
        sla_target: payload.sla_target,
        chain_id: payload.chain_id,
        confirmations: payload.confirmations,
        merkle_proof: Vec::new(),
        signature: signer
            .sign_payload(payload)
            .expect("signing succeeds")
            .to_bytes()
            .to_vec(),
    }
}

/// Ledger-level submission signed by `signer`.
pub fn submission(signer: &AttestationSigner, payload: &AttestationPayload) -> Submission {
    Submission {
        oracle: signer.address(),
        payload: *payload,
        signature: signer
            .sign_payload(payload)
            .expect("signing succeeds")
            .to_bytes()
            .to_vec(),
        merkle_proof: MerkleProof::default(),
    }
}

/// Admit every signer with `stake` through the admin API.
pub async fn admit(service: &FinalityOracleService, signers: &[AttestationSigner], stake: Wei) {
    let cap = service.authorize(&OWNER).expect("owner is authorized");
    for signer in signers {
        service
            .admit_oracle(&cap, signer.address(), stake)
            .await
            .expect("admission succeeds");
    }
}

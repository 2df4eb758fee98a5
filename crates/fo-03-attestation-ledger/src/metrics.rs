//! # Ledger Metrics
//!
//! Prometheus counters for attestation flow and penalties.
//!
//! Enable with the `metrics` feature:
//! ```toml
//! fo-03-attestation-ledger = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `oracle_attestations_accepted_total`
//! - `oracle_attestations_rejected_total` (by reason)
//! - `oracle_attestation_conflicts_total`
//! - `oracle_proofs_finalized_total`
//! - `oracle_slashes_total` (by reason)
//! - `oracle_deactivations_total`

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    pub static ref ATTESTATIONS_ACCEPTED: IntCounter = register_int_counter!(
        "oracle_attestations_accepted_total",
        "Total number of attestations appended to a proof"
    )
    .expect("Failed to create ATTESTATIONS_ACCEPTED metric");

    /// Rejected submissions, labeled by reason
    pub static ref ATTESTATIONS_REJECTED: IntCounterVec = register_int_counter_vec!(
        "oracle_attestations_rejected_total",
        "Total number of rejected submissions",
        &["reason"]
    )
    .expect("Failed to create ATTESTATIONS_REJECTED metric");

    pub static ref ATTESTATION_CONFLICTS: IntCounter = register_int_counter!(
        "oracle_attestation_conflicts_total",
        "Total number of conflicting attestations detected"
    )
    .expect("Failed to create ATTESTATION_CONFLICTS metric");

    pub static ref PROOFS_FINALIZED: IntCounter = register_int_counter!(
        "oracle_proofs_finalized_total",
        "Total number of proofs that reached quorum"
    )
    .expect("Failed to create PROOFS_FINALIZED metric");

    /// Executed slashes, labeled by misbehaviour reason
    pub static ref SLASHES: IntCounterVec = register_int_counter_vec!(
        "oracle_slashes_total",
        "Total number of slashes executed",
        &["reason"]
    )
    .expect("Failed to create SLASHES metric");

    pub static ref DEACTIVATIONS: IntCounter = register_int_counter!(
        "oracle_deactivations_total",
        "Total number of oracles deactivated by slashing"
    )
    .expect("Failed to create DEACTIVATIONS metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

#[cfg(feature = "metrics")]
pub fn record_attestation_accepted() {
    ATTESTATIONS_ACCEPTED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_attestation_rejected(reason: &str) {
    ATTESTATIONS_REJECTED.with_label_values(&[reason]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_conflict() {
    ATTESTATION_CONFLICTS.inc();
}

#[cfg(feature = "metrics")]
pub fn record_proof_finalized() {
    PROOFS_FINALIZED.inc();
}

#[cfg(feature = "metrics")]
pub fn record_slash(reason: &str, deactivated: bool) {
    SLASHES.with_label_values(&[reason]).inc();
    if deactivated {
        DEACTIVATIONS.inc();
    }
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_attestation_accepted() {}

#[cfg(not(feature = "metrics"))]
pub fn record_attestation_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_conflict() {}

#[cfg(not(feature = "metrics"))]
pub fn record_proof_finalized() {}

#[cfg(not(feature = "metrics"))]
pub fn record_slash(_reason: &str, _deactivated: bool) {}

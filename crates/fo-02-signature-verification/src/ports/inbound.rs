//! # Inbound Ports

use crate::domain::entities::AttestationPayload;
use shared_types::Address;

/// Binds a signature over a canonical payload to a signing identity.
///
/// Implementations must be thread-safe and must never panic on malformed
/// input. The ledger only talks to this trait, so the curve and hash scheme
/// can be swapped without touching aggregation logic.
pub trait AttestationVerifier: Send + Sync {
    /// Identity that produced `signature` over `payload`, if any.
    ///
    /// `None` for malformed bytes or any failed check.
    fn recover(&self, payload: &AttestationPayload, signature: &[u8]) -> Option<Address>;

    /// True iff `signature` over `payload` was produced by `claimed`.
    fn verify(&self, payload: &AttestationPayload, claimed: &Address, signature: &[u8]) -> bool {
        self.recover(payload, signature).as_ref() == Some(claimed)
    }
}

//! Inbound attestation request
//!
//! Carries the fields exactly as a client sends them. Shape is checked here,
//! before anything reaches the ledger.

use crate::error::{SubmissionError, SubmissionResult};
use fo_02_signature_verification::{AttestationPayload, FinalityStatus};
use fo_03_attestation_ledger::{MerkleProof, Submission};
use serde::{Deserialize, Serialize};
use shared_types::{bytes_to_fixed, Address, ChainId, Hash, Timestamp, ZERO_HASH};

/// `submitAttestation` arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAttestationRequest {
    /// Submitting oracle (sender context)
    pub oracle: Address,
    pub tx_hash: Vec<u8>,
    pub timestamp: Timestamp,
    /// 0 = Pending, 1 = Finalized
    pub status: u8,
    pub sla_target: u64,
    pub chain_id: ChainId,
    pub confirmations: u64,
    /// Sibling hashes, leaf side first; may be empty
    pub merkle_proof: Vec<Vec<u8>>,
    pub signature: Vec<u8>,
}

impl SubmitAttestationRequest {
    /// Validate shape and build the ledger submission.
    pub fn into_submission(self) -> SubmissionResult<Submission> {
        let tx_hash: Hash = bytes_to_fixed(&self.tx_hash).map_err(|e| invalid("tx_hash", e))?;
        if tx_hash == ZERO_HASH {
            return Err(invalid("tx_hash", "must not be zero"));
        }
        let status = FinalityStatus::from_u8(self.status)
            .ok_or_else(|| invalid("status", format!("unknown status code {}", self.status)))?;
        if self.sla_target == 0 {
            return Err(invalid("sla_target", "must be positive"));
        }
        if self.confirmations == 0 {
            return Err(invalid("confirmations", "must be positive"));
        }

        let siblings = self
            .merkle_proof
            .iter()
            .enumerate()
            .map(|(level, node)| {
                bytes_to_fixed::<32>(node).map_err(|e| SubmissionError::MalformedProof {
                    reason: format!("node at level {}: {}", level, e),
                })
            })
            .collect::<SubmissionResult<Vec<Hash>>>()?;

        Ok(Submission {
            oracle: self.oracle,
            payload: AttestationPayload {
                tx_hash,
                timestamp: self.timestamp,
                status,
                sla_target: self.sla_target,
                chain_id: self.chain_id,
                confirmations: self.confirmations,
            },
            signature: self.signature,
            merkle_proof: MerkleProof::new(siblings),
        })
    }
}

fn invalid(field: &'static str, reason: impl ToString) -> SubmissionError {
    SubmissionError::InvalidArgument {
        field,
        reason: reason.to_string(),
    }
}

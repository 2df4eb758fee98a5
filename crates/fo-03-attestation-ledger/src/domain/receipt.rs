//! Submission outcomes

use super::proof::FinalityProof;
use serde::{Deserialize, Serialize};

/// How a successful submission was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionOutcome {
    /// Appended to the proof and counted
    Accepted,
    /// Byte-identical resubmission, nothing changed
    Duplicate,
    /// Proof was already finalized, nothing changed
    AlreadyFinalized,
    /// Oracle already attested differently on this key; not counted
    Conflict { slashed: bool },
    /// Signature recovered to a different registered oracle than the submitter
    SignatureReplay { slashed: bool },
}

impl SubmissionOutcome {
    /// Success that the caller should surface as a warning.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Conflict { .. } | Self::SignatureReplay { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Duplicate => "duplicate",
            Self::AlreadyFinalized => "already_finalized",
            Self::Conflict { .. } => "conflict",
            Self::SignatureReplay { .. } => "signature_replay",
        }
    }
}

/// Result of a submission together with the proof state after it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub outcome: SubmissionOutcome,
    /// `None` only when nothing has ever been recorded for the key
    pub state: Option<FinalityProof>,
}

impl SubmissionReceipt {
    pub fn new(outcome: SubmissionOutcome, state: Option<FinalityProof>) -> Self {
        Self { outcome, state }
    }

    pub fn is_finalized(&self) -> bool {
        self.state.as_ref().map(FinalityProof::is_finalized).unwrap_or(false)
    }
}

//! Reputation bounds and deltas

use crate::error::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};

/// Reputation scoring configuration.
///
/// Scores live in `[0, max]`. Penalties are applied as negative deltas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReputationConfig {
    /// Score given to a newly admitted oracle
    pub initial: u32,
    /// Upper clamp
    pub max: u32,
    /// Reward for an accepted attestation
    pub accept_reward: u32,
    /// Penalty for a conflicting or otherwise slashable attestation
    pub conflict_penalty: u32,
    /// Penalty for attesting a finalized claim below its SLA target
    pub missed_sla_penalty: u32,
}

impl Default for ReputationConfig {
    fn default() -> Self {
        Self {
            initial: 100,
            max: 1_000,
            accept_reward: 1,
            conflict_penalty: 50,
            missed_sla_penalty: 10,
        }
    }
}

impl ReputationConfig {
    pub fn validate(&self) -> RegistryResult<()> {
        if self.initial > self.max {
            return Err(RegistryError::InvalidParameter {
                name: "reputation.initial",
                reason: format!("{} exceeds max {}", self.initial, self.max),
            });
        }
        if self.missed_sla_penalty >= self.conflict_penalty {
            return Err(RegistryError::InvalidParameter {
                name: "reputation.missed_sla_penalty",
                reason: "must be smaller than conflict_penalty".into(),
            });
        }
        Ok(())
    }

    /// Apply `delta` to `score`, clamped to `[0, max]`.
    pub fn apply(&self, score: u32, delta: i64) -> u32 {
        let next = (score as i64).saturating_add(delta);
        next.clamp(0, self.max as i64) as u32
    }
}

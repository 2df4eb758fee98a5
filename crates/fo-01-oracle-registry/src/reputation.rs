//! Reputation Tracker
//!
//! Advisory score adjustments. Reputation never gates admission or
//! attestation counting.

use crate::domain::ReputationConfig;
use crate::error::RegistryResult;
use crate::registry::OracleRegistry;
use shared_types::{short_hex, Address};
use std::sync::Arc;
use tracing::debug;

pub struct ReputationTracker {
    registry: Arc<OracleRegistry>,
    config: ReputationConfig,
}

impl ReputationTracker {
    pub fn new(registry: Arc<OracleRegistry>) -> Self {
        let config = *registry.reputation_config();
        Self { registry, config }
    }

    pub fn config(&self) -> &ReputationConfig {
        &self.config
    }

    /// Small reward for a counted attestation.
    pub fn on_accepted(&self, oracle: &Address) -> RegistryResult<u32> {
        self.registry
            .adjust_reputation(oracle, self.config.accept_reward as i64)
    }

    /// Large penalty accompanying a slash.
    pub fn on_conflict(&self, oracle: &Address) -> RegistryResult<u32> {
        let score = self
            .registry
            .adjust_reputation(oracle, -(self.config.conflict_penalty as i64))?;
        debug!(
            "[fo-01] Conflict penalty for {}, reputation now {}",
            short_hex(oracle),
            score
        );
        Ok(score)
    }

    /// Moderate penalty for finalizing with fewer confirmations than the SLA target.
    pub fn on_missed_sla(&self, oracle: &Address) -> RegistryResult<u32> {
        let score = self
            .registry
            .adjust_reputation(oracle, -(self.config.missed_sla_penalty as i64))?;
        debug!(
            "[fo-01] Missed-SLA penalty for {}, reputation now {}",
            short_hex(oracle),
            score
        );
        Ok(score)
    }

    pub fn score(&self, oracle: &Address) -> Option<u32> {
        self.registry.get(oracle).map(|o| o.reputation)
    }
}

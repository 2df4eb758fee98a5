//! Oracle Registry
//!
//! Holds every admitted oracle (active or not), its stake, active flag and
//! reputation. Entries are never erased: removal and slash-driven
//! deactivation only clear `is_active` so historical attestations stay
//! attributable.

use crate::domain::{Oracle, ParameterStore, Parameters, ReputationConfig, SlashApplied};
use crate::error::{RegistryError, RegistryResult};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use shared_types::{short_hex, Address, Wei, ZERO_ADDRESS};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Registry of staked oracles.
pub struct OracleRegistry {
    oracles: DashMap<Address, Oracle>,
    parameters: Arc<ParameterStore>,
    reputation: ReputationConfig,
    /// Serializes admission and parameter changes (both read `active_count`)
    admission: Mutex<()>,
    active_count: AtomicUsize,
    next_seq: AtomicU64,
}

impl OracleRegistry {
    pub fn new(parameters: Arc<ParameterStore>, reputation: ReputationConfig) -> Self {
        Self {
            oracles: DashMap::new(),
            parameters,
            reputation,
            admission: Mutex::new(()),
            active_count: AtomicUsize::new(0),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Shared parameter block.
    pub fn parameters(&self) -> &Arc<ParameterStore> {
        &self.parameters
    }

    /// Reputation bounds used by this registry.
    pub fn reputation_config(&self) -> &ReputationConfig {
        &self.reputation
    }

    /// Admit an oracle with `stake`.
    ///
    /// A previously removed or slashed-out oracle can be admitted again: it
    /// keeps its reputation and listing position, and `stake` replaces the
    /// remaining bond.
    pub fn admit(&self, address: Address, stake: Wei) -> RegistryResult<Oracle> {
        if address == ZERO_ADDRESS {
            return Err(RegistryError::ZeroAddress);
        }

        let _admission = self.admission.lock();
        let params = self.parameters.current();

        if self.is_active(&address) {
            return Err(RegistryError::AlreadyRegistered { address });
        }
        if self.active_count() >= params.max_oracles as usize {
            return Err(RegistryError::CapacityExceeded {
                max: params.max_oracles,
            });
        }
        if stake < params.min_stake {
            return Err(RegistryError::InsufficientStake {
                stake,
                min: params.min_stake,
            });
        }

        let oracle = match self.oracles.entry(address) {
            Entry::Occupied(mut entry) => {
                let oracle = entry.get_mut();
                if oracle.is_active {
                    return Err(RegistryError::AlreadyRegistered { address });
                }
                oracle.stake = stake;
                oracle.is_active = true;
                oracle.clone()
            }
            Entry::Vacant(entry) => {
                let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
                entry
                    .insert(Oracle::new(address, stake, self.reputation.initial, seq))
                    .clone()
            }
        };
        self.active_count.fetch_add(1, Ordering::SeqCst);

        info!(
            "[fo-01] Admitted oracle {} with stake {} wei",
            short_hex(&address),
            stake
        );
        Ok(oracle)
    }

    /// Soft-delete an oracle: mark it inactive, keep its record.
    pub fn remove(&self, address: &Address) -> RegistryResult<Oracle> {
        let _admission = self.admission.lock();
        let mut entry = self
            .oracles
            .get_mut(address)
            .ok_or(RegistryError::UnknownOracle { address: *address })?;

        if entry.is_active {
            entry.is_active = false;
            self.active_count.fetch_sub(1, Ordering::SeqCst);
            info!("[fo-01] Removed oracle {}", short_hex(address));
        } else {
            debug!("[fo-01] Oracle {} already inactive", short_hex(address));
        }
        Ok(entry.clone())
    }

    /// Reduce stake by `amount`, floored at zero.
    ///
    /// Dropping below the current minimum stake deactivates the oracle. Its
    /// already-recorded attestations are not touched.
    pub fn slash(&self, address: &Address, amount: Wei) -> RegistryResult<SlashApplied> {
        let mut entry = self
            .oracles
            .get_mut(address)
            .ok_or(RegistryError::UnknownOracle { address: *address })?;
        // Read under the entry lock so a concurrent minimum-stake sweep either
        // sees this slash or is seen by it.
        let min_stake = self.parameters.current().min_stake;

        let taken = amount.min(entry.stake);
        entry.stake -= taken;

        let deactivated = entry.is_active && entry.stake < min_stake;
        if deactivated {
            entry.is_active = false;
            self.active_count.fetch_sub(1, Ordering::SeqCst);
            warn!(
                "[fo-01] Oracle {} deactivated: stake {} below minimum {}",
                short_hex(address),
                entry.stake,
                min_stake
            );
        }

        Ok(SlashApplied {
            taken,
            stake_after: entry.stake,
            deactivated,
        })
    }

    /// Add `delta` to the oracle's reputation, clamped to the valid range.
    pub fn adjust_reputation(&self, address: &Address, delta: i64) -> RegistryResult<u32> {
        let mut entry = self
            .oracles
            .get_mut(address)
            .ok_or(RegistryError::UnknownOracle { address: *address })?;
        entry.reputation = self.reputation.apply(entry.reputation, delta);
        Ok(entry.reputation)
    }

    // =========================================================================
    // BOUNDED PARAMETER SETTERS
    // =========================================================================

    pub fn set_required_signatures(&self, required: u32) -> RegistryResult<Parameters> {
        let _admission = self.admission.lock();
        self.parameters.update(|p| p.required_signatures = required)
    }

    /// Lowering below the current active count or below `required_signatures` is rejected.
    pub fn set_max_oracles(&self, max: u32) -> RegistryResult<Parameters> {
        let _admission = self.admission.lock();
        let active = self.active_count();
        if (max as usize) < active {
            return Err(RegistryError::InvalidParameter {
                name: "max_oracles",
                reason: format!("{} active oracles exceed requested maximum {}", active, max),
            });
        }
        self.parameters.update(|p| p.max_oracles = max)
    }

    /// Raise or lower the minimum stake.
    ///
    /// Active oracles whose stake falls below the new minimum are deactivated;
    /// their addresses are returned.
    pub fn set_min_stake(&self, min_stake: Wei) -> RegistryResult<(Parameters, Vec<Address>)> {
        let _admission = self.admission.lock();
        let params = self.parameters.update(|p| p.min_stake = min_stake)?;

        let mut deactivated = Vec::new();
        for mut entry in self.oracles.iter_mut() {
            if entry.is_active && entry.stake < min_stake {
                entry.is_active = false;
                self.active_count.fetch_sub(1, Ordering::SeqCst);
                deactivated.push(entry.address);
            }
        }
        deactivated.sort();

        if !deactivated.is_empty() {
            warn!(
                "[fo-01] Minimum stake raised to {} wei, deactivated {} oracles",
                min_stake,
                deactivated.len()
            );
        }
        Ok((params, deactivated))
    }

    pub fn set_slashing_amount(&self, amount: Wei) -> RegistryResult<Parameters> {
        let _admission = self.admission.lock();
        self.parameters.update(|p| p.slashing_amount = amount)
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub fn get(&self, address: &Address) -> Option<Oracle> {
        self.oracles.get(address).map(|o| o.clone())
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.oracles.contains_key(address)
    }

    pub fn is_active(&self, address: &Address) -> bool {
        self.oracles
            .get(address)
            .map(|o| o.is_active)
            .unwrap_or(false)
    }

    pub fn active_count(&self) -> usize {
        self.active_count.load(Ordering::SeqCst)
    }

    /// Active oracle addresses in order of first admission.
    pub fn list_active(&self) -> Vec<Address> {
        let mut active: Vec<(u64, Address)> = self
            .oracles
            .iter()
            .filter(|o| o.is_active)
            .map(|o| (o.admitted_seq, o.address))
            .collect();
        active.sort();
        active.into_iter().map(|(_, address)| address).collect()
    }

    /// Every oracle ever admitted, in order of first admission.
    pub fn all(&self) -> Vec<Oracle> {
        let mut all: Vec<Oracle> = self.oracles.iter().map(|o| o.clone()).collect();
        all.sort_by_key(|o| o.admitted_seq);
        all
    }

    // =========================================================================
    // RESTORE
    // =========================================================================

    /// Replace the registry contents with `oracles`, re-checking invariants.
    ///
    /// Nothing is modified when a check fails.
    pub fn restore(&self, oracles: Vec<Oracle>) -> RegistryResult<()> {
        let _admission = self.admission.lock();
        let params = self.parameters.current();

        let mut seen = HashSet::new();
        let mut active = 0usize;
        let mut next_seq = 0u64;
        for oracle in &oracles {
            if !seen.insert(oracle.address) {
                return Err(RegistryError::InvariantViolation {
                    reason: format!("duplicate oracle {}", short_hex(&oracle.address)),
                });
            }
            if oracle.reputation > self.reputation.max {
                return Err(RegistryError::InvariantViolation {
                    reason: format!(
                        "oracle {} reputation {} above maximum {}",
                        short_hex(&oracle.address),
                        oracle.reputation,
                        self.reputation.max
                    ),
                });
            }
            if oracle.is_active {
                if !oracle.meets_min_stake(params.min_stake) {
                    return Err(RegistryError::InvariantViolation {
                        reason: format!(
                            "active oracle {} stake {} below minimum {}",
                            short_hex(&oracle.address),
                            oracle.stake,
                            params.min_stake
                        ),
                    });
                }
                active += 1;
            }
            next_seq = next_seq.max(oracle.admitted_seq + 1);
        }
        if active > params.max_oracles as usize {
            return Err(RegistryError::InvariantViolation {
                reason: format!("{} active oracles exceed maximum {}", active, params.max_oracles),
            });
        }

        self.oracles.clear();
        for oracle in oracles {
            self.oracles.insert(oracle.address, oracle);
        }
        self.active_count.store(active, Ordering::SeqCst);
        self.next_seq.store(next_seq, Ordering::SeqCst);
        info!("[fo-01] Restored {} oracles ({} active)", seen.len(), active);
        Ok(())
    }
}

//! Global parameter block
//!
//! Read by every component, mutated only through the registry's bounded
//! setters (which the access controller gates). Changes apply to operations
//! that read the block afterwards; nothing is re-evaluated retroactively.

use crate::error::{RegistryError, RegistryResult};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use shared_types::{milli_ether, Wei};

/// Process-wide parameters
///
/// Wei amounts travel as decimal strings: TOML has no 128-bit integers.
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Consistent attestations needed to finalize a proof
    pub required_signatures: u32,
    /// Maximum number of simultaneously active oracles
    pub max_oracles: u32,
    /// Minimum stake for admission and for staying active
    #[serde_as(as = "DisplayFromStr")]
    pub min_stake: Wei,
    /// Stake removed per slashable offense
    #[serde_as(as = "DisplayFromStr")]
    pub slashing_amount: Wei,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            required_signatures: 3,
            max_oracles: 10,
            min_stake: milli_ether(1_000),
            slashing_amount: milli_ether(100),
        }
    }
}

impl Parameters {
    /// Check the block is internally consistent.
    pub fn validate(&self) -> RegistryResult<()> {
        if self.max_oracles == 0 {
            return Err(RegistryError::InvalidParameter {
                name: "max_oracles",
                reason: "must be at least 1".into(),
            });
        }
        if self.required_signatures == 0 || self.required_signatures > self.max_oracles {
            return Err(RegistryError::InvalidParameter {
                name: "required_signatures",
                reason: format!(
                    "must be between 1 and max_oracles ({}), got {}",
                    self.max_oracles, self.required_signatures
                ),
            });
        }
        if self.min_stake == 0 {
            return Err(RegistryError::InvalidParameter {
                name: "min_stake",
                reason: "must be non-zero".into(),
            });
        }
        if self.slashing_amount == 0 {
            return Err(RegistryError::InvalidParameter {
                name: "slashing_amount",
                reason: "must be non-zero".into(),
            });
        }
        Ok(())
    }
}

/// Shared, lock-protected parameter block.
#[derive(Debug)]
pub struct ParameterStore {
    inner: RwLock<Parameters>,
}

impl ParameterStore {
    /// Create a store from a validated parameter block.
    pub fn new(parameters: Parameters) -> RegistryResult<Self> {
        parameters.validate()?;
        Ok(Self {
            inner: RwLock::new(parameters),
        })
    }

    /// Copy of the parameters in effect right now.
    pub fn current(&self) -> Parameters {
        *self.inner.read()
    }

    /// Apply `change` to a copy, validate it, then publish it.
    ///
    /// The stored block is untouched when validation fails.
    pub fn update<F>(&self, change: F) -> RegistryResult<Parameters>
    where
        F: FnOnce(&mut Parameters),
    {
        let mut guard = self.inner.write();
        let mut candidate = *guard;
        change(&mut candidate);
        candidate.validate()?;
        *guard = candidate;
        Ok(candidate)
    }

    /// Replace the whole block (snapshot restore).
    pub fn replace(&self, parameters: Parameters) -> RegistryResult<()> {
        parameters.validate()?;
        *self.inner.write() = parameters;
        Ok(())
    }
}

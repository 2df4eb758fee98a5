//! Engine configuration
//!
//! Loaded from TOML, then overridden from the environment:
//!
//! ```toml
//! owner = "0x5b38da6a701c568545dcfcb03fcb875f56beddc4"
//!
//! [parameters]
//! required_signatures = 3
//! max_oracles = 10
//! min_stake = "1000000000000000000"
//! slashing_amount = "100000000000000000"
//!
//! [reputation]
//! initial = 100
//! max = 1000
//!
//! [policy]
//! slash_dissenters = true
//!
//! [storage]
//! snapshot_path = "data/oracle-snapshot.bin"
//! ```
//!
//! Wei amounts are quoted decimal strings.
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `FO_OWNER` | `owner` |
//! | `FO_SNAPSHOT_PATH` | `storage.snapshot_path` |
//! | `FO_REQUIRED_SIGNATURES` | `parameters.required_signatures` |
//! | `FO_MAX_ORACLES` | `parameters.max_oracles` |

use crate::error::{ConfigError, ConfigResult};
use fo_01_oracle_registry::{Parameters, ReputationConfig};
use fo_03_attestation_ledger::LedgerPolicy;
use serde::{Deserialize, Serialize};
use shared_types::{parse_address, Address};
use std::fs;
use std::path::{Path, PathBuf};

/// Snapshot location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub snapshot_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("data/oracle-snapshot.bin"),
        }
    }
}

/// Full engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hex address of the administrator
    pub owner: Option<String>,
    /// Initial parameters; a restored snapshot carries its own
    pub parameters: Parameters,
    pub reputation: ReputationConfig,
    pub policy: LedgerPolicy,
    pub storage: StorageConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `FO_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> ConfigResult<Self> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply `FO_*` overrides from `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(owner) = lookup("FO_OWNER") {
            self.owner = Some(owner);
        }
        if let Some(path) = lookup("FO_SNAPSHOT_PATH") {
            self.storage.snapshot_path = PathBuf::from(path);
        }
        if let Some(value) = lookup("FO_REQUIRED_SIGNATURES") {
            self.parameters.required_signatures = parse_u32("FO_REQUIRED_SIGNATURES", &value)?;
        }
        if let Some(value) = lookup("FO_MAX_ORACLES") {
            self.parameters.max_oracles = parse_u32("FO_MAX_ORACLES", &value)?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.parameters.validate().map_err(|e| ConfigError::Invalid {
            field: "parameters".into(),
            reason: e.to_string(),
        })?;
        self.reputation.validate().map_err(|e| ConfigError::Invalid {
            field: "reputation".into(),
            reason: e.to_string(),
        })?;
        self.owner_address()?;
        Ok(())
    }

    /// Parsed owner address.
    pub fn owner_address(&self) -> ConfigResult<Address> {
        let owner = self.owner.as_deref().ok_or_else(|| ConfigError::Invalid {
            field: "owner".into(),
            reason: "no owner configured".into(),
        })?;
        parse_address(owner).map_err(|e| ConfigError::Invalid {
            field: "owner".into(),
            reason: e.to_string(),
        })
    }
}

fn parse_u32(field: &str, value: &str) -> ConfigResult<u32> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        field: field.into(),
        reason: format!("'{}' is not an unsigned integer", value),
    })
}

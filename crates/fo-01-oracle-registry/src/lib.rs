//! # fo-01-oracle-registry
//!
//! Staked oracle registry with the economic penalty model attached to it.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **OracleRegistry**: admitted attestors, their stake, active flag and reputation
//! - **Parameters**: the process-wide parameter block (quorum, capacity, minimum stake, slash size)
//! - **ReputationTracker**: bounded, advisory reputation adjustments
//! - **SlashingEngine**: irreversible, evidence-idempotent stake penalties
//!
//! ## Invariants
//!
//! - An active oracle's stake is always `>= min_stake`. Slashing below the
//!   minimum, or raising the minimum above an oracle's stake, deactivates it.
//! - Reputation is clamped to `[0, ReputationConfig::max]`.
//! - Removal is a soft delete: the entry is kept for audit with `is_active = false`.
//!
//! ## Locking
//!
//! Oracle entries live in a sharded `DashMap`, so mutations of one address are
//! serialized while different addresses proceed concurrently. Admission and
//! parameter changes additionally hold a registry-wide admission lock because
//! they read the active-oracle count.
//!
//! ## Example
//!
//! ```rust,ignore
//! use fo_01_oracle_registry::{OracleRegistry, Parameters, ParameterStore, ReputationConfig};
//!
//! let params = Arc::new(ParameterStore::new(Parameters::default())?);
//! let registry = Arc::new(OracleRegistry::new(params, ReputationConfig::default()));
//!
//! registry.admit(oracle, 2 * WEI_PER_ETHER)?;
//! assert!(registry.is_active(&oracle));
//! ```

pub mod domain;
pub mod error;
pub mod registry;
pub mod reputation;
pub mod slashing;

pub use domain::{
    MisbehaviorEvidence, MisbehaviorReason, Oracle, ParameterStore, Parameters,
    ReputationConfig, SlashApplied, SlashRecord,
};
pub use error::{RegistryError, RegistryResult};
pub use registry::OracleRegistry;
pub use reputation::ReputationTracker;
pub use slashing::SlashingEngine;

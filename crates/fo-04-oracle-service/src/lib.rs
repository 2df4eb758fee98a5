//! # fo-04-oracle-service
//!
//! Public face of the finality oracle engine.
//!
//! ## Overview
//!
//! - **FinalityOracleApi**: attestation submission and proof queries
//! - **OracleAdminApi**: owner-gated oracle admission and parameter changes
//! - **AccessController**: issues the [`OwnerCapability`] every admin call needs
//! - **Snapshots**: the whole engine state as one versioned bincode blob,
//!   re-validated on restore
//!
//! ## Wiring
//!
//! ```text
//! FinalityOracleService
//!   ├── AccessController
//!   ├── OracleRegistry ◄── ReputationTracker ◄── SlashingEngine
//!   └── AttestationLedger ──► SignatureVerifier
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use fo_04_oracle_service::{EngineConfig, FinalityOracleService, OracleAdminApi};
//!
//! let service = FinalityOracleService::new(&config, Arc::new(SystemTimeSource))?;
//! let cap = service.authorize(&owner)?;
//! service.admit_oracle(&cap, oracle, stake).await?;
//! ```

pub mod access;
pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use access::{AccessController, OwnerCapability};
pub use adapters::{FileSnapshotStore, MemorySnapshotStore};
pub use config::{EngineConfig, StorageConfig};
pub use domain::{Snapshot, SubmitAttestationRequest, SNAPSHOT_VERSION};
pub use error::{
    AdmissionError, AdmissionResult, ConfigError, ConfigResult, ServiceError, ServiceResult,
    SnapshotError, SnapshotResult, SubmissionError, SubmissionResult,
};
pub use ports::inbound::{FinalityOracleApi, OracleAdminApi};
pub use ports::outbound::SnapshotStore;
pub use service::{version, FinalityOracleService};

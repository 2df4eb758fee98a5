//! Domain module for the oracle registry
//!
//! ## Core Modules
//! - oracle: admitted attestor entity
//! - parameters: process-wide parameter block
//! - reputation: reputation bounds and deltas
//! - slashing: misbehavior reasons, evidence and the slash audit record

pub mod oracle;
pub mod parameters;
pub mod reputation;
pub mod slashing;

pub use oracle::Oracle;
pub use parameters::{ParameterStore, Parameters};
pub use reputation::ReputationConfig;
pub use slashing::{MisbehaviorEvidence, MisbehaviorReason, SlashApplied, SlashRecord};

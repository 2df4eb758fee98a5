//! # Integration Tests
//!
//! End-to-end flows through `FinalityOracleService`.

pub mod determinism;
pub mod flows;
pub mod persistence;

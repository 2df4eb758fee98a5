//! # Finality Oracle Test Suite
//!
//! Cross-crate tests driving the engine through its public API with real
//! secp256k1 keys.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Engine, signer and request builders
//! └── integration/
//!     ├── flows.rs        # Quorum, conflict, slashing and admin flows
//!     ├── concurrency.rs  # Parallel submitters on shared and distinct keys
//!     ├── persistence.rs  # File snapshot round trips and rejected snapshots
//!     └── determinism.rs  # Replay laws
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p fo-tests
//! cargo test -p fo-tests integration::concurrency
//!
//! # Benchmarks
//! cargo bench -p fo-tests
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;

//! # Shared Types Crate
//!
//! Primitive types used across the Finality Oracle subsystems.
//!
//! ## Design Principles
//!
//! - **Fixed-width identities**: transaction hashes are `[u8; 32]`, oracle
//!   addresses are Ethereum-style `[u8; 20]`.
//! - **Integer money**: every stake and penalty amount is `u128` wei.
//! - **Injectable time**: subsystems read wall-clock time through
//!   [`TimeSource`] so replays are deterministic.

pub mod encoding;
pub mod entities;
pub mod errors;
pub mod time;

pub use encoding::*;
pub use entities::*;
pub use errors::*;
pub use time::{FixedTimeSource, SystemTimeSource, TimeSource};

//! Adapters implementing the outbound ports

pub mod snapshot;

pub use snapshot::{FileSnapshotStore, MemorySnapshotStore};

//! Driven Ports (SPI - Outbound Dependencies)

use crate::domain::Snapshot;
use crate::error::SnapshotResult;

/// Durable storage for engine snapshots.
pub trait SnapshotStore: Send + Sync {
    /// Last saved snapshot, `None` if nothing was ever saved.
    fn load(&self) -> SnapshotResult<Option<Snapshot>>;

    /// Replace the stored snapshot atomically.
    fn save(&self, snapshot: &Snapshot) -> SnapshotResult<()>;
}

use crate::domain::Snapshot;
use crate::error::SnapshotResult;
use crate::ports::outbound::SnapshotStore;
use parking_lot::Mutex;

/// In-memory snapshot store for tests.
///
/// Keeps the encoded bytes so that saving and loading go through the same
/// codec as the file store.
#[derive(Default)]
pub struct MemorySnapshotStore {
    bytes: Mutex<Option<Vec<u8>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> Option<Vec<u8>> {
        self.bytes.lock().clone()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> SnapshotResult<Option<Snapshot>> {
        self.bytes
            .lock()
            .as_deref()
            .map(Snapshot::decode)
            .transpose()
    }

    fn save(&self, snapshot: &Snapshot) -> SnapshotResult<()> {
        let encoded = snapshot.encode()?;
        *self.bytes.lock() = Some(encoded);
        Ok(())
    }
}

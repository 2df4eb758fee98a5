use crate::domain::Snapshot;
use crate::error::{SnapshotError, SnapshotResult};
use crate::ports::outbound::SnapshotStore;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Single-file snapshot store.
///
/// Writes go to a sibling temp file which is synced and then renamed over
/// the snapshot, so a crash leaves either the old or the new snapshot.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, e: std::io::Error) -> SnapshotError {
        SnapshotError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> SnapshotResult<Option<Snapshot>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("[fo-04] No snapshot at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let snapshot = Snapshot::decode(&bytes)?;
        info!(
            "[fo-04] Loaded snapshot from {} ({} bytes, {} oracles, {} proofs)",
            self.path.display(),
            bytes.len(),
            snapshot.oracles.len(),
            snapshot.proofs.len()
        );
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> SnapshotResult<()> {
        let bytes = snapshot.encode()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(|e| self.io_error(e))?;
        file.write_all(&bytes).map_err(|e| self.io_error(e))?;
        file.sync_all().map_err(|e| self.io_error(e))?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;

        debug!(
            "[fo-04] Saved snapshot to {} ({} bytes)",
            self.path.display(),
            bytes.len()
        );
        Ok(())
    }
}

//! Service-level request and persistence types

pub mod request;
pub mod snapshot;

pub use request::SubmitAttestationRequest;
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};

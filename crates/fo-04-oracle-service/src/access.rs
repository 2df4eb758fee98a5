//! Access Controller
//!
//! Owner-only administration is enforced structurally: every mutating admin
//! entry point takes an [`OwnerCapability`], and the only way to obtain one
//! is [`AccessController::authorize`] with the owner's address.

use crate::error::{AdmissionError, AdmissionResult};
use shared_types::{short_hex, Address};
use tracing::warn;
use uuid::Uuid;

/// Proof that the holder passed the owner check of one specific controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnerCapability {
    controller: Uuid,
    owner: Address,
}

impl OwnerCapability {
    pub fn owner(&self) -> Address {
        self.owner
    }
}

/// Issues and checks owner capabilities.
#[derive(Debug)]
pub struct AccessController {
    id: Uuid,
    owner: Address,
}

impl AccessController {
    pub fn new(owner: Address) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Issue a capability if `caller` is the owner.
    pub fn authorize(&self, caller: &Address) -> AdmissionResult<OwnerCapability> {
        if *caller != self.owner {
            warn!("[fo-04] Unauthorized admin attempt by {}", short_hex(caller));
            return Err(AdmissionError::Unauthorized { caller: *caller });
        }
        Ok(OwnerCapability {
            controller: self.id,
            owner: self.owner,
        })
    }

    /// Check a capability was issued by this controller.
    pub fn check(&self, capability: &OwnerCapability) -> AdmissionResult<()> {
        if capability.controller != self.id || capability.owner != self.owner {
            return Err(AdmissionError::Unauthorized {
                caller: capability.owner,
            });
        }
        Ok(())
    }
}

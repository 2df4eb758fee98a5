//! Oracle entity

use serde::{Deserialize, Serialize};
use shared_types::{Address, Wei};

/// A staked identity permitted to attest to transaction finality.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Oracle {
    /// Ethereum-style address recovered from the oracle's signatures
    pub address: Address,
    /// Bonded stake in wei
    pub stake: Wei,
    /// Whether the oracle may submit new attestations
    pub is_active: bool,
    /// Advisory reputation score, clamped to the configured range
    pub reputation: u32,
    /// Order of first admission (stable listing order)
    pub admitted_seq: u64,
}

impl Oracle {
    pub fn new(address: Address, stake: Wei, reputation: u32, admitted_seq: u64) -> Self {
        Self {
            address,
            stake,
            is_active: true,
            reputation,
            admitted_seq,
        }
    }

    /// Whether the stake still satisfies `min_stake`
    pub fn meets_min_stake(&self, min_stake: Wei) -> bool {
        self.stake >= min_stake
    }
}

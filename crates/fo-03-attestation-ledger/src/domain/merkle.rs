//! Merkle proof structure
//!
//! The ledger only checks shape. Binding a proof to external chain state is
//! left to a light-client collaborator, which can use [`MerkleProof::compute_root`].

use crate::error::{LedgerError, LedgerResult};
use fo_02_signature_verification::keccak256;
use serde::{Deserialize, Serialize};
use shared_types::{Hash, ZERO_HASH};

/// Deepest tree a proof may describe.
pub const MAX_MERKLE_DEPTH: usize = 64;

/// Sibling path from a leaf up to the root, leaf side first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    pub siblings: Vec<Hash>,
}

impl MerkleProof {
    pub fn new(siblings: Vec<Hash>) -> Self {
        Self { siblings }
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.siblings.len()
    }

    /// Structural checks. An empty proof is valid.
    pub fn validate(&self) -> LedgerResult<()> {
        if self.depth() > MAX_MERKLE_DEPTH {
            return Err(LedgerError::MalformedProof {
                reason: format!("depth {} exceeds {}", self.depth(), MAX_MERKLE_DEPTH),
            });
        }
        if let Some(index) = self.siblings.iter().position(|node| *node == ZERO_HASH) {
            return Err(LedgerError::MalformedProof {
                reason: format!("empty node at level {}", index),
            });
        }
        Ok(())
    }

    /// Fold `leaf` up the path, hashing each pair in sorted order.
    pub fn compute_root(&self, leaf: &Hash) -> Hash {
        self.siblings.iter().fold(*leaf, |node, sibling| {
            let (left, right) = if node <= *sibling {
                (node, *sibling)
            } else {
                (*sibling, node)
            };
            let mut buf = [0u8; 64];
            buf[..32].copy_from_slice(&left);
            buf[32..].copy_from_slice(&right);
            keccak256(&buf)
        })
    }

    pub fn verify(&self, leaf: &Hash, root: &Hash) -> bool {
        self.validate().is_ok() && self.compute_root(leaf) == *root
    }
}

//! ZNS node hashing, following the ENS namehash scheme

use alloy::primitives::{keccak256, B256};

/// Hash a single label of a ZNS name
pub fn labelhash(label: &str) -> B256 {
    keccak256(label.as_bytes())
}

/// Compute the node identifying the given `.`-separated name.
///
/// The empty name is the root node, `0x00..00`. Labels are hashed as given,
/// with no normalization applied.
pub fn namehash(name: &str) -> B256 {
    if name.is_empty() {
        return B256::ZERO;
    }

    name.rsplit('.').fold(B256::ZERO, |node, label| {
        let mut preimage = [0u8; 64];
        preimage[..32].copy_from_slice(node.as_slice());
        preimage[32..].copy_from_slice(labelhash(label).as_slice());
        keccak256(preimage)
    })
}

//! Function selector computation.

use alloy::primitives::keccak256;

/// First four bytes of the keccak-256 hash of a canonical signature
/// string, e.g. `transfer(address,uint256)`.
///
/// A routing tag only; it authenticates nothing.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

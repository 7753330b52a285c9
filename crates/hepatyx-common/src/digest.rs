//! Stable content digests for structure strings.
//!
//! Derived identifiers (`pred_<n>`, `<strategy>_<n>_<i>`) must be identical
//! across runs and platforms, so they are taken from a SHA-256 digest of the
//! structure string rather than any process-seeded hash.

use sha2::{Digest, Sha256};

/// First eight bytes of the SHA-256 digest of a structure string,
/// interpreted as a big-endian u64.
pub fn structure_digest(structure: &str) -> u64 {
    let hash = Sha256::digest(structure.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash[..8]);
    u64::from_be_bytes(bytes)
}

//! Content-hash collaborator used by every persisted entity in the node.
//!
//! The node core only depends on the [`Hash`] trait and the [`Hash32`] digest
//! type; the concrete digest (Blake2b-256) is this crate's reference
//! implementation of the collaborator described by the specification.

use std::fmt;

use blake2::{Blake2b512, Digest};
use byteorder::{BigEndian, ByteOrder};

/// A 32-byte content hash.
///
/// The all-zero value is used throughout the protocol crate as the
/// "uncomputed" sentinel for lazily-cached Merkle roots.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Hash32(pub [u8; 32]);

impl Hash32 {
    pub const ZERO: Hash32 = Hash32([0u8; 32]);

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Interprets the first 8 bytes as a big-endian u64.
    ///
    /// Used by shard dispatch, which only ever looks at address-shaped
    /// 64-byte fields, not at a `Hash32` itself, but the helper lives here
    /// since the truncation rule is identical.
    pub fn leading_u64(bytes: &[u8]) -> u64 {
        BigEndian::read_u64(&bytes[0..8])
    }
}

impl From<[u8; 32]> for Hash32 {
    fn from(bytes: [u8; 32]) -> Self {
        Hash32(bytes)
    }
}

impl AsRef<[u8]> for Hash32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash32({})", hex::encode(self.0))
    }
}

impl fmt::Display for Hash32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0[0..8]))
    }
}

/// Implemented by every entity that can be content-addressed.
pub trait Hash {
    fn hash(&self) -> Hash32;
}

/// Computes the Blake2b-256 digest of an arbitrary byte slice.
///
/// This is the reference digest function for [`Hash`] implementations across
/// the protocol crate. Blake2b-512 is used internally and truncated to 256
/// bits, matching the common "Blake2b-256" parametrization.
pub fn hash_bytes(data: &[u8]) -> Hash32 {
    let mut hasher = Blake2b512::new();
    hasher.update(data);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest[0..32]);
    Hash32(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let a = hash_bytes(b"hello shard");
        let b = hash_bytes(b"hello shard");
        assert_eq!(a, b);
    }

    #[test]
    fn hash_is_sensitive_to_input() {
        let a = hash_bytes(b"hello shard");
        let b = hash_bytes(b"hello shard!");
        assert_ne!(a, b);
    }

    #[test]
    fn zero_is_zero() {
        assert!(Hash32::ZERO.is_zero());
        assert!(!hash_bytes(b"x").is_zero());
    }

    #[test]
    fn leading_u64_reads_big_endian() {
        let mut addr = [0u8; 64];
        addr[7] = 5;
        assert_eq!(Hash32::leading_u64(&addr), 5);
    }
}

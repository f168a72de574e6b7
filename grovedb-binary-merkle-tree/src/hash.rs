//! Hash functions the tree can be built with.
//!
//! The tree never picks an algorithm itself. Callers pass a [`MerkleHasher`]
//! at construction time; the same hasher must be used to verify proofs.
//! Parent nodes are always `hash(left || right)` with no domain tag, which is
//! what keeps roots compatible with Ethereum-style allowlist contracts.

#[cfg(feature = "keccak")]
use sha3::Keccak256;
use sha2::{Digest as _, Sha256};

use crate::Digest;

/// One-way hash mapping arbitrary bytes to a fixed-width [`Digest`].
///
/// `Sync` is required so a built tree can be shared across threads and so
/// pair hashing can fan out over the rayon pool.
pub trait MerkleHasher: Sync {
    /// Hash arbitrary bytes.
    fn hash(&self, data: &[u8]) -> Digest;

    /// Hash two child nodes into their parent: `hash(left || right)`.
    ///
    /// Implementations may override this to avoid the intermediate buffer
    /// but must produce the same digest as the default.
    fn hash_pair(&self, left: &Digest, right: &Digest) -> Digest {
        let mut input = Vec::with_capacity(left.len() + right.len());
        input.extend_from_slice(left.as_bytes());
        input.extend_from_slice(right.as_bytes());
        self.hash(&input)
    }
}

impl<F> MerkleHasher for F
where
    F: Fn(&[u8]) -> Digest + Sync,
{
    fn hash(&self, data: &[u8]) -> Digest {
        self(data)
    }
}

/// Hash two children into their parent, ordering them byte-wise first when
/// `sort_pairs` is set.
///
/// Shared by tree construction and proof verification so both sides agree on
/// the concatenation order.
pub(crate) fn node_hash<H: MerkleHasher + ?Sized>(
    hasher: &H,
    left: &Digest,
    right: &Digest,
    sort_pairs: bool,
) -> Digest {
    if sort_pairs && right < left {
        hasher.hash_pair(right, left)
    } else {
        hasher.hash_pair(left, right)
    }
}

/// Blake3, 32-byte digests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake3Hasher;

impl MerkleHasher for Blake3Hasher {
    fn hash(&self, data: &[u8]) -> Digest {
        Digest::from(*blake3::hash(data).as_bytes())
    }

    fn hash_pair(&self, left: &Digest, right: &Digest) -> Digest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(left.as_bytes());
        hasher.update(right.as_bytes());
        Digest::from(*hasher.finalize().as_bytes())
    }
}

/// SHA-256, 32-byte digests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hasher;

impl MerkleHasher for Sha256Hasher {
    fn hash(&self, data: &[u8]) -> Digest {
        Digest::new(Sha256::digest(data).to_vec())
    }

    fn hash_pair(&self, left: &Digest, right: &Digest) -> Digest {
        let out = Sha256::new()
            .chain_update(left.as_bytes())
            .chain_update(right.as_bytes())
            .finalize();
        Digest::new(out.to_vec())
    }
}

/// Keccak-256 (the pre-standard SHA-3 variant used by Ethereum), 32-byte
/// digests.
#[cfg(feature = "keccak")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keccak256Hasher;

#[cfg(feature = "keccak")]
impl MerkleHasher for Keccak256Hasher {
    fn hash(&self, data: &[u8]) -> Digest {
        Digest::new(Keccak256::digest(data).to_vec())
    }

    fn hash_pair(&self, left: &Digest, right: &Digest) -> Digest {
        let out = Keccak256::new()
            .chain_update(left.as_bytes())
            .chain_update(right.as_bytes())
            .finalize();
        Digest::new(out.to_vec())
    }
}

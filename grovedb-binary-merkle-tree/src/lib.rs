//! Binary Merkle tree with pluggable hashing.
//!
//! The tree is built once from a fixed, ordered leaf set and is read-only
//! afterwards. Every internal node is `hash(left || right)`:
//!
//! - **Hashing** is injected through [`MerkleHasher`]. Blake3, SHA-256 and
//!   (with the `keccak` feature) Keccak-256 are provided, and any
//!   `Fn(&[u8]) -> Digest` closure works too.
//! - **Sorted pairs** ([`TreeOptions::sort_pairs`]) order each pair byte-wise
//!   before hashing, so proofs verify without knowing sibling positions. This
//!   is the layout Ethereum allowlist contracts expect.
//! - **Odd layers** duplicate their last node by default
//!   (`hash(x || x)`); [`OddNodePolicy::Promote`] carries it up unchanged.
//!
//! ```
//! use grovedb_binary_merkle_tree::{BinaryMerkleTree, Blake3Hasher, TreeOptions};
//!
//! let tree = BinaryMerkleTree::from_values(
//!     [b"alpha", b"bravo", b"charl"],
//!     Blake3Hasher,
//!     TreeOptions::new().with_sort_pairs(true),
//! )?;
//! let leaf = tree.leaf(1).expect("three leaves").clone();
//! let proof = tree.prove(&leaf)?;
//! assert!(tree.verify(&proof, &leaf));
//! # Ok::<(), grovedb_binary_merkle_tree::BinaryMerkleError>(())
//! ```

#![warn(missing_docs)]

mod digest;
mod error;
pub(crate) mod hash;
mod leaves;
mod options;
pub(crate) mod proof;
pub(crate) mod tree;
mod verify;


pub use digest::Digest;
pub use error::{BinaryMerkleError, Result};
#[cfg(feature = "keccak")]
pub use hash::Keccak256Hasher;
pub use hash::{Blake3Hasher, MerkleHasher, Sha256Hasher};
pub use leaves::LeafSet;
pub use options::{OddNodePolicy, TreeOptions};
pub use proof::{InclusionProof, Position, ProofStep};
pub use tree::BinaryMerkleTree;
pub use verify::{try_verify, verify, verify_hex};

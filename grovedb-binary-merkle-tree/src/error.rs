use thiserror::Error;

use crate::Digest;

/// Errors from binary Merkle tree operations.
///
/// A proof that simply does not lead to the expected root is not an error;
/// verification reports that as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BinaryMerkleError {
    /// A leaf or digest could not be decoded, or digest lengths differ.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Tried to build a tree from zero leaves.
    #[error("cannot build a tree without leaves")]
    EmptyTree,
    /// Proof requested for a leaf that is not in the bottom layer.
    #[error("leaf {0} is not part of the tree")]
    LeafNotFound(Digest),
    /// Proof requested for a position past the last leaf.
    #[error("leaf index {index} is out of range (count {count})")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of leaves in the tree.
        count: usize,
    },
    /// The proof cannot be evaluated at all (wrong digest length, corrupt
    /// encoding).
    #[error("malformed proof: {0}")]
    MalformedProof(String),
}

/// Alias for `core::result::Result<T, BinaryMerkleError>`.
pub type Result<T> = core::result::Result<T, BinaryMerkleError>;

//! Inclusion proof generation.
//!
//! A proof is the list of siblings met while walking from a leaf up to the
//! root, each tagged with the side it sits on. Proofs are plain values with no
//! reference back to the tree that produced them.

use bincode::{Decode, Encode};
use tracing::debug;

use crate::{BinaryMerkleError, BinaryMerkleTree, Digest, OddNodePolicy, Result};

/// Which side of the running hash a sibling sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    /// Sibling is the left child: `parent = hash(sibling || current)`.
    Left,
    /// Sibling is the right child: `parent = hash(current || sibling)`.
    Right,
}

/// One level of an inclusion proof.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProofStep {
    /// The node paired with the running hash at this level.
    pub sibling: Digest,
    /// Side the sibling sits on.
    pub position: Position,
}

/// Siblings from the leaf's level up to just below the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InclusionProof {
    steps: Vec<ProofStep>,
}

impl InclusionProof {
    /// Construct a proof from explicit steps.
    pub fn new(steps: Vec<ProofStep>) -> Self {
        Self { steps }
    }

    /// The steps, leaf level first.
    pub fn steps(&self) -> &[ProofStep] {
        &self.steps
    }

    /// Consume the proof and return its steps.
    pub fn into_steps(self) -> Vec<ProofStep> {
        self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True for the empty proof of a single-leaf tree.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sibling digests as `0x`-prefixed hex, without positions.
    ///
    /// This is the form sorted-pair verifiers such as OpenZeppelin's
    /// `MerkleProof` expect.
    pub fn to_hex(&self) -> Vec<String> {
        self.steps.iter().map(|step| step.sibling.to_hex()).collect()
    }

    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| BinaryMerkleError::MalformedProof(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode.
    ///
    /// Rejects trailing bytes and steps whose siblings differ in width.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ 16 * 1024 * 1024 }>(); // 16MB limit
        let (proof, read): (Self, usize) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| BinaryMerkleError::MalformedProof(format!("decode error: {}", e)))?;
        if read != bytes.len() {
            return Err(BinaryMerkleError::MalformedProof(format!(
                "{} trailing bytes after proof",
                bytes.len() - read
            )));
        }
        if let Some(first) = proof.steps.first() {
            let width = first.sibling.len();
            if let Some(step) = proof.steps.iter().find(|s| s.sibling.len() != width) {
                return Err(BinaryMerkleError::MalformedProof(format!(
                    "sibling {} is {} bytes wide, expected {}",
                    step.sibling,
                    step.sibling.len(),
                    width
                )));
            }
        }
        Ok(proof)
    }
}

impl<H> BinaryMerkleTree<H> {
    /// Prove membership of `leaf`.
    ///
    /// When the leaf occurs more than once the first occurrence is proved.
    /// Fails with [`BinaryMerkleError::LeafNotFound`] when it does not occur.
    pub fn prove(&self, leaf: &Digest) -> Result<InclusionProof> {
        match self.leaf_index(leaf) {
            Some(index) => self.prove_index(index),
            None => {
                debug!(leaf = %leaf, "proof requested for absent leaf");
                Err(BinaryMerkleError::LeafNotFound(leaf.clone()))
            }
        }
    }

    /// Prove membership of the leaf at `index`.
    pub fn prove_index(&self, index: usize) -> Result<InclusionProof> {
        let count = self.leaf_count();
        if index >= count {
            return Err(BinaryMerkleError::IndexOutOfRange { index, count });
        }

        let layers = self.layers();
        let mut steps = Vec::with_capacity(self.depth());
        let mut index = index;
        for layer in &layers[..layers.len() - 1] {
            let sibling_index = index ^ 1;
            let position = if index % 2 == 1 {
                Position::Left
            } else {
                Position::Right
            };
            match layer.get(sibling_index) {
                Some(sibling) => steps.push(ProofStep {
                    sibling: sibling.clone(),
                    position,
                }),
                // Unpaired last node of an odd layer.
                None => match self.options().odd_node {
                    OddNodePolicy::DuplicateLast => steps.push(ProofStep {
                        sibling: layer[index].clone(),
                        position: Position::Right,
                    }),
                    OddNodePolicy::Promote => {}
                },
            }
            index /= 2;
        }

        Ok(InclusionProof { steps })
    }

    /// Prove membership of `leaf` and return the siblings as hex.
    pub fn prove_hex(&self, leaf: &Digest) -> Result<Vec<String>> {
        self.prove(leaf).map(|proof| proof.to_hex())
    }
}

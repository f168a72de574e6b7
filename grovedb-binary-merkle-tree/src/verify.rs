//! Proof verification.
//!
//! Pure functions, no tree required. The root is recomputed by folding the
//! proof over the leaf and compared byte-wise to the expected root. A proof
//! that leads elsewhere yields `false`; only a proof that cannot be evaluated
//! at all is an error.

use crate::{
    hash::node_hash, BinaryMerkleError, BinaryMerkleTree, Digest, InclusionProof, MerkleHasher,
    Position, ProofStep, Result,
};

impl InclusionProof {
    /// Build a proof from bare hex siblings.
    ///
    /// Hex proofs carry no positions, so every sibling is taken as a left
    /// sibling. Such proofs are only meaningful with sorted pairs, where
    /// positions are ignored.
    pub fn from_hex<I, S>(siblings: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let steps = siblings
            .into_iter()
            .map(|s| {
                Ok(ProofStep {
                    sibling: Digest::from_hex(s.as_ref())?,
                    position: Position::Left,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(steps))
    }

    /// Fold the proof over `leaf` and return the resulting root.
    ///
    /// Fails with [`BinaryMerkleError::MalformedProof`] when a sibling does
    /// not have the leaf's width.
    pub fn compute_root<H: MerkleHasher + ?Sized>(
        &self,
        leaf: &Digest,
        hasher: &H,
        sort_pairs: bool,
    ) -> Result<Digest> {
        let width = leaf.len();
        self.steps()
            .iter()
            .enumerate()
            .try_fold(leaf.clone(), |computed, (level, step)| {
                if step.sibling.len() != width {
                    return Err(BinaryMerkleError::MalformedProof(format!(
                        "sibling at level {} is {} bytes wide, leaf is {}",
                        level,
                        step.sibling.len(),
                        width
                    )));
                }
                Ok(match step.position {
                    Position::Left => node_hash(hasher, &step.sibling, &computed, sort_pairs),
                    Position::Right => node_hash(hasher, &computed, &step.sibling, sort_pairs),
                })
            })
    }

    /// Check this proof against `root`. See [`verify`].
    pub fn verify<H: MerkleHasher + ?Sized>(
        &self,
        leaf: &Digest,
        root: &Digest,
        hasher: &H,
        sort_pairs: bool,
    ) -> bool {
        verify(self, leaf, root, hasher, sort_pairs)
    }
}

/// Check that `proof` links `leaf` to `root`.
///
/// With `sort_pairs` each step orders the running hash and the sibling
/// byte-wise, so step positions are irrelevant. Malformed proofs also yield
/// `false`; use [`try_verify`] to tell them apart.
pub fn verify<H: MerkleHasher + ?Sized>(
    proof: &InclusionProof,
    leaf: &Digest,
    root: &Digest,
    hasher: &H,
    sort_pairs: bool,
) -> bool {
    try_verify(proof, leaf, root, hasher, sort_pairs).unwrap_or(false)
}

/// Like [`verify`], but reports a proof that cannot be evaluated as
/// [`BinaryMerkleError::MalformedProof`] instead of `false`.
pub fn try_verify<H: MerkleHasher + ?Sized>(
    proof: &InclusionProof,
    leaf: &Digest,
    root: &Digest,
    hasher: &H,
    sort_pairs: bool,
) -> Result<bool> {
    if root.len() != leaf.len() {
        return Err(BinaryMerkleError::MalformedProof(format!(
            "root is {} bytes wide, leaf is {}",
            root.len(),
            leaf.len()
        )));
    }
    let computed = proof.compute_root(leaf, hasher, sort_pairs)?;
    Ok(&computed == root)
}

/// Verify hex-encoded inputs. Siblings are treated as in
/// [`InclusionProof::from_hex`].
///
/// Bare hex siblings carry no positions, so this is only useful with
/// `sort_pairs` set. With positional pairs every sibling is taken as a left
/// sibling and a valid proof from a positional tree generally yields
/// `Ok(false)`; use [`verify`] with an [`InclusionProof`] instead.
///
/// Fails with [`BinaryMerkleError::InvalidInput`] on malformed hex and with
/// [`BinaryMerkleError::MalformedProof`] on width mismatches.
pub fn verify_hex<H, I, S>(
    siblings: I,
    leaf: &str,
    root: &str,
    hasher: &H,
    sort_pairs: bool,
) -> Result<bool>
where
    H: MerkleHasher + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let proof = InclusionProof::from_hex(siblings)?;
    let leaf = Digest::from_hex(leaf)?;
    let root = Digest::from_hex(root)?;
    try_verify(&proof, &leaf, &root, hasher, sort_pairs)
}

impl<H: MerkleHasher> BinaryMerkleTree<H> {
    /// Check a proof against this tree's root, hasher and pair ordering.
    pub fn verify(&self, proof: &InclusionProof, leaf: &Digest) -> bool {
        verify(proof, leaf, self.root(), self.hasher(), self.options().sort_pairs)
    }
}

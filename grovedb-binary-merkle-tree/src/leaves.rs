//! Leaf normalization.
//!
//! Every constructor yields one digest per input, in input order, with no
//! deduplication. All digests in a set must have the same non-zero width.

use crate::{BinaryMerkleError, Digest, MerkleHasher, Result};

/// Ordered leaf digests ready to be built into a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafSet {
    leaves: Vec<Digest>,
}

impl LeafSet {
    /// Use already-hashed digests as leaves.
    pub fn from_digests<I>(digests: I) -> Result<Self>
    where
        I: IntoIterator<Item = Digest>,
    {
        let leaves: Vec<Digest> = digests.into_iter().collect();
        check_widths(&leaves)?;
        Ok(Self { leaves })
    }

    /// Parse hex-encoded digests (`0x` prefix optional).
    pub fn from_hex<I, S>(encoded: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let leaves = encoded
            .into_iter()
            .enumerate()
            .map(|(index, s)| {
                Digest::from_hex(s.as_ref()).map_err(|e| match e {
                    BinaryMerkleError::InvalidInput(msg) => {
                        BinaryMerkleError::InvalidInput(format!("leaf {}: {}", index, msg))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_digests(leaves)
    }

    /// Hash each raw value with `hasher` and use the results as leaves.
    pub fn from_values<I, V, H>(values: I, hasher: &H) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<[u8]>,
        H: MerkleHasher + ?Sized,
    {
        Self::from_digests(values.into_iter().map(|v| hasher.hash(v.as_ref())))
    }

    /// Sort the leaves byte-wise ascending.
    pub fn sorted(mut self) -> Self {
        self.leaves.sort();
        self
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// True when there are no leaves.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// The leaves as a slice.
    pub fn as_slice(&self) -> &[Digest] {
        &self.leaves
    }

    /// Consume the set and return the digests.
    pub fn into_digests(self) -> Vec<Digest> {
        self.leaves
    }
}

fn check_widths(leaves: &[Digest]) -> Result<()> {
    let Some(first) = leaves.first() else {
        return Ok(());
    };
    let width = first.len();
    if width == 0 {
        return Err(BinaryMerkleError::InvalidInput(
            "leaf 0 is an empty digest".into(),
        ));
    }
    if let Some((index, leaf)) = leaves
        .iter()
        .enumerate()
        .find(|(_, leaf)| leaf.len() != width)
    {
        return Err(BinaryMerkleError::InvalidInput(format!(
            "leaf {} is {} bytes wide, expected {}",
            index,
            leaf.len(),
            width
        )));
    }
    Ok(())
}

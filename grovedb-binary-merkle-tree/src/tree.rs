#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{
    hash::node_hash, BinaryMerkleError, Digest, LeafSet, MerkleHasher, OddNodePolicy, Result,
    TreeOptions,
};

/// Layers at least this long hash their pairs on the rayon pool.
#[cfg(feature = "parallel")]
const PARALLEL_MIN_LAYER: usize = 1024;

/// A binary Merkle tree built once from a fixed leaf set.
///
/// Layer 0 holds the leaves and the last layer holds only the root. Every
/// layer above the leaves has `ceil(len(previous) / 2)` nodes. The tree is
/// immutable; adding or removing leaves means building a new one.
///
/// The hasher and options are kept so that proofs can be generated and
/// checked against this tree without passing them again.
#[derive(Clone)]
pub struct BinaryMerkleTree<H> {
    layers: Vec<Vec<Digest>>,
    hasher: H,
    options: TreeOptions,
    hash_calls: u64,
}

// Manual impl so closure hashers (which are not `Debug`) are still supported.
impl<H> std::fmt::Debug for BinaryMerkleTree<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryMerkleTree")
            .field("layers", &self.layers)
            .field("options", &self.options)
            .field("hash_calls", &self.hash_calls)
            .finish_non_exhaustive()
    }
}

impl<H: MerkleHasher> BinaryMerkleTree<H> {
    /// Build the tree bottom-up.
    ///
    /// A single leaf is its own root and costs no hashing. Fails with
    /// [`BinaryMerkleError::EmptyTree`] when `leaves` is empty and with
    /// [`BinaryMerkleError::InvalidInput`] when the leaves are not as wide as
    /// the hasher's digests.
    pub fn build(leaves: LeafSet, hasher: H, options: TreeOptions) -> Result<Self> {
        if leaves.is_empty() {
            return Err(BinaryMerkleError::EmptyTree);
        }
        let leaves = if options.sort_leaves {
            leaves.sorted()
        } else {
            leaves
        };

        let leaf_width = leaves.as_slice()[0].len();
        if leaves.len() == 1 {
            check_output_width(leaf_width, hasher.hash(&[]).len())?;
        }

        let mut layers = vec![leaves.into_digests()];
        let mut hash_calls = 0u64;
        while let Some(current) = layers.last().filter(|layer| layer.len() > 1) {
            let (next, calls) = build_layer(current, &hasher, options);
            if layers.len() == 1 {
                // The first node of a layer above the leaves is always hashed.
                check_output_width(leaf_width, next[0].len())?;
            }
            trace!(
                level = layers.len(),
                width = next.len(),
                hash_calls = calls,
                "built merkle layer"
            );
            hash_calls += calls;
            layers.push(next);
        }

        let tree = Self {
            layers,
            hasher,
            options,
            hash_calls,
        };
        debug!(
            leaf_count = tree.leaf_count(),
            depth = tree.depth(),
            hash_calls,
            root = %tree.root(),
            "built binary merkle tree"
        );
        Ok(tree)
    }

    /// Build from already-hashed leaf digests.
    pub fn from_digests<I>(digests: I, hasher: H, options: TreeOptions) -> Result<Self>
    where
        I: IntoIterator<Item = Digest>,
    {
        Self::build(LeafSet::from_digests(digests)?, hasher, options)
    }

    /// Hash each raw value with `hasher` and build from the results.
    pub fn from_values<I, V>(values: I, hasher: H, options: TreeOptions) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<[u8]>,
    {
        let leaves = LeafSet::from_values(values, &hasher)?;
        Self::build(leaves, hasher, options)
    }
}

impl<H> BinaryMerkleTree<H> {
    /// The root commitment.
    pub fn root(&self) -> &Digest {
        // Construction guarantees a non-empty top layer.
        &self.layers[self.layers.len() - 1][0]
    }

    /// The root as `0x`-prefixed lowercase hex.
    pub fn root_hex(&self) -> String {
        self.root().to_hex()
    }

    /// All layers, leaves first.
    pub fn layers(&self) -> &[Vec<Digest>] {
        &self.layers
    }

    /// All layers as hex strings, leaves first.
    pub fn layers_hex(&self) -> Vec<Vec<String>> {
        self.layers
            .iter()
            .map(|layer| layer.iter().map(Digest::to_hex).collect())
            .collect()
    }

    /// The leaves, after optional sorting.
    pub fn leaves(&self) -> &[Digest] {
        &self.layers[0]
    }

    /// Leaf at `index`, if any.
    pub fn leaf(&self, index: usize) -> Option<&Digest> {
        self.leaves().get(index)
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Position of the first leaf equal to `leaf`.
    pub fn leaf_index(&self, leaf: &Digest) -> Option<usize> {
        self.leaves().iter().position(|l| l == leaf)
    }

    /// Number of layers above the leaves. Zero for a single-leaf tree.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Options the tree was built with.
    pub fn options(&self) -> TreeOptions {
        self.options
    }

    /// The hasher the tree was built with.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Number of pair hashes performed while building.
    pub fn hash_calls(&self) -> u64 {
        self.hash_calls
    }
}

/// Leaves must have the hasher's output width, otherwise proofs would mix
/// digest widths and could never verify.
fn check_output_width(leaf_width: usize, hash_width: usize) -> Result<()> {
    if leaf_width != hash_width {
        return Err(BinaryMerkleError::InvalidInput(format!(
            "leaves are {} bytes wide but the hasher produces {} byte digests",
            leaf_width, hash_width
        )));
    }
    Ok(())
}

/// Compute the parent layer of `current`.
///
/// Returns `(next_layer, hash_calls)`.
fn build_layer<H: MerkleHasher>(
    current: &[Digest],
    hasher: &H,
    options: TreeOptions,
) -> (Vec<Digest>, u64) {
    let parent = |pair: &[Digest]| match pair {
        [left, right] => node_hash(hasher, left, right, options.sort_pairs),
        [last] => match options.odd_node {
            OddNodePolicy::DuplicateLast => node_hash(hasher, last, last, options.sort_pairs),
            OddNodePolicy::Promote => last.clone(),
        },
        _ => unreachable!("chunks(2) yields one or two nodes"),
    };

    let odd_hashed =
        current.len() % 2 == 1 && options.odd_node == OddNodePolicy::DuplicateLast;
    let calls = (current.len() / 2) as u64 + u64::from(odd_hashed);

    #[cfg(feature = "parallel")]
    {
        if current.len() >= PARALLEL_MIN_LAYER {
            return (current.par_chunks(2).map(parent).collect(), calls);
        }
    }

    (current.chunks(2).map(parent).collect(), calls)
}

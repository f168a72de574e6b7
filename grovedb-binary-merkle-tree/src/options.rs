//! Construction options.

/// What to do with the last node of a layer that has an odd length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OddNodePolicy {
    /// Pair the node with itself: `parent = hash(x || x)`. Proofs carry a
    /// self-referential step for it, so every proof has exactly
    /// `ceil(log2(leaf_count))` steps.
    #[default]
    DuplicateLast,
    /// Carry the node up to the next layer unchanged. No hash is spent on it
    /// and its proof omits the step for that layer.
    Promote,
}

/// Options fixed at build time and needed again to verify proofs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeOptions {
    /// Order each pair byte-wise before hashing, making proofs independent of
    /// left/right position.
    pub sort_pairs: bool,
    /// Sort the leaves byte-wise before building.
    pub sort_leaves: bool,
    /// Handling of odd-length layers.
    pub odd_node: OddNodePolicy,
}

impl TreeOptions {
    /// Positional pairs, leaves in input order, duplicate-last odd nodes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorted pairs and sorted leaves, so the root depends only on the set of
    /// leaves and not on their input order.
    pub fn sorted() -> Self {
        Self {
            sort_pairs: true,
            sort_leaves: true,
            odd_node: OddNodePolicy::DuplicateLast,
        }
    }

    /// Set `sort_pairs`.
    pub fn with_sort_pairs(mut self, sort_pairs: bool) -> Self {
        self.sort_pairs = sort_pairs;
        self
    }

    /// Set `sort_leaves`.
    pub fn with_sort_leaves(mut self, sort_leaves: bool) -> Self {
        self.sort_leaves = sort_leaves;
        self
    }

    /// Set the odd node policy.
    pub fn with_odd_node(mut self, odd_node: OddNodePolicy) -> Self {
        self.odd_node = odd_node;
        self
    }
}

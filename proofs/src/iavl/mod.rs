//! IAVL tree inclusion proofs
//!
//! A range proof names the leaves it proves and the inner nodes on the path
//! from the leftmost leaf up to the root. Every inner node stores the hash of
//! the child that is not on the path, so exactly one of `left`/`right` is
//! normally set.

mod encoding;

#[cfg(feature = "serde")]
use serde::Serialize;

pub use encoding::decode_compact_operator;

/// A proven leaf.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LeafNode {
    /// Leaf key.
    #[cfg_attr(feature = "serde", serde(serialize_with = "hex::serde::serialize"))]
    pub key: Vec<u8>,
    /// Hash of the value stored under the key.
    #[cfg_attr(feature = "serde", serde(serialize_with = "hex::serde::serialize"))]
    pub value_hash: Vec<u8>,
    /// Tree version the leaf was written at.
    pub version: i64,
}

/// An inner node on a proof path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct InnerNode {
    /// Height of the node above the leaves.
    pub height: i32,
    /// Number of leaves below the node.
    pub size: i64,
    /// Tree version the node was written at.
    pub version: i64,
    /// Left child hash, empty when the path continues left.
    #[cfg_attr(feature = "serde", serde(serialize_with = "hex::serde::serialize"))]
    pub left: Vec<u8>,
    /// Right child hash, empty when the path continues right.
    #[cfg_attr(feature = "serde", serde(serialize_with = "hex::serde::serialize"))]
    pub right: Vec<u8>,
}

impl InnerNode {
    /// The sibling hash, when exactly one side is set.
    pub fn sibling_hash(&self) -> Option<&[u8]> {
        match (self.left.is_empty(), self.right.is_empty()) {
            (false, true) => Some(&self.left),
            (true, false) => Some(&self.right),
            _ => None,
        }
    }
}

/// Decoded `iavl:v` operator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TreeInclusionProof {
    /// The key the operator claims to prove.
    #[cfg_attr(feature = "serde", serde(serialize_with = "hex::serde::serialize"))]
    pub key: Vec<u8>,
    /// Leaves in wire order.
    pub leaves: Vec<LeafNode>,
    /// Sibling path of the leftmost leaf, leaf side first.
    pub path: Vec<InnerNode>,
    /// Paths of the remaining leaves of a range proof. Not part of the
    /// compact format, where it is always empty.
    pub inner_paths: Vec<Vec<InnerNode>>,
}

impl TreeInclusionProof {
    /// Number of proven leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Whether the proof covers exactly one leaf.
    pub fn is_single_leaf(&self) -> bool {
        self.leaves.len() == 1
    }

    /// Whether any leaf carries the queried key.
    pub fn proves_key(&self) -> bool {
        self.leaves.iter().any(|leaf| leaf.key == self.key)
    }
}

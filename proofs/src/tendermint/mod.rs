//! Decoders for the operators found in Tendermint `ProofOps`.
//!
//! Every operator payload is an amino message behind a var-int length
//! prefix. The prefix must cover the payload exactly.

#[allow(missing_docs)]
pub mod wire;

use prost::Message;
use proofscope_codec::{ByteCursor, Error as CodecError};
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    error::OperatorError,
    iavl::{InnerNode, LeafNode, TreeInclusionProof},
    operator::{DecodedOperator, RawOperator},
};

/// Commit of one store under the application hash.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct StoreCommit {
    /// Store name, e.g. `ibc`.
    pub name: String,
    /// Version the store was committed at.
    pub version: i64,
    /// Root hash of the store, empty for stores that were never written.
    #[cfg_attr(feature = "serde", serde(serialize_with = "hex::serde::serialize"))]
    pub commit_hash: Vec<u8>,
}

/// Decoded `multistore` operator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MultiStoreProof {
    /// Name of the store the preceding operator proves into.
    #[cfg_attr(feature = "serde", serde(serialize_with = "hex::serde::serialize"))]
    pub key: Vec<u8>,
    /// Store commits in wire order.
    pub stores: Vec<StoreCommit>,
}

impl MultiStoreProof {
    /// The commit of the store named by `key`.
    pub fn keyed_store(&self) -> Option<&StoreCommit> {
        self.stores
            .iter()
            .find(|store| store.name.as_bytes() == self.key.as_slice())
    }
}

/// Decoded `simple:v` operator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SimpleValueProof {
    /// Proven key.
    #[cfg_attr(feature = "serde", serde(serialize_with = "hex::serde::serialize"))]
    pub key: Vec<u8>,
    /// Number of leaves in the simple tree.
    pub total: i64,
    /// Position of the proven leaf.
    pub index: i64,
    /// Hash of the proven leaf.
    #[cfg_attr(feature = "serde", serde(serialize_with = "hex::serde::serialize"))]
    pub leaf_hash: Vec<u8>,
    /// Sibling hashes from the leaf up.
    #[cfg_attr(feature = "serde", serde(serialize_with = "crate::serde_hex::serialize_list"))]
    pub aunts: Vec<Vec<u8>>,
}

/// Strip the amino length prefix.
fn amino_body(payload: &[u8]) -> Result<&[u8], CodecError> {
    let mut cursor = ByteCursor::new(payload);
    let body = cursor.read_length_prefixed()?;
    cursor.finish()?;
    Ok(body)
}

fn missing_proof(type_key: &str) -> OperatorError {
    OperatorError::Invalid(format!("{type_key} operator carries no proof"))
}

impl From<wire::ProofInnerNode> for InnerNode {
    fn from(node: wire::ProofInnerNode) -> Self {
        InnerNode {
            height: node.height,
            size: node.size,
            version: node.version,
            left: node.left,
            right: node.right,
        }
    }
}

impl From<InnerNode> for wire::ProofInnerNode {
    fn from(node: InnerNode) -> Self {
        wire::ProofInnerNode {
            height: node.height,
            size: node.size,
            version: node.version,
            left: node.left,
            right: node.right,
        }
    }
}

impl From<wire::ProofLeafNode> for LeafNode {
    fn from(leaf: wire::ProofLeafNode) -> Self {
        LeafNode {
            key: leaf.key,
            value_hash: leaf.value_hash,
            version: leaf.version,
        }
    }
}

impl From<LeafNode> for wire::ProofLeafNode {
    fn from(leaf: LeafNode) -> Self {
        wire::ProofLeafNode {
            key: leaf.key,
            value_hash: leaf.value_hash,
            version: leaf.version,
        }
    }
}

impl From<TreeInclusionProof> for wire::RangeProof {
    fn from(proof: TreeInclusionProof) -> Self {
        wire::RangeProof {
            left_path: proof.path.into_iter().map(Into::into).collect(),
            inner_nodes: proof
                .inner_paths
                .into_iter()
                .map(|inners| wire::PathToLeaf {
                    inners: inners.into_iter().map(Into::into).collect(),
                })
                .collect(),
            leaves: proof.leaves.into_iter().map(Into::into).collect(),
        }
    }
}

fn tree_proof(key: &[u8], proof: wire::RangeProof) -> TreeInclusionProof {
    TreeInclusionProof {
        key: key.to_vec(),
        leaves: proof.leaves.into_iter().map(Into::into).collect(),
        path: proof.left_path.into_iter().map(Into::into).collect(),
        inner_paths: proof
            .inner_nodes
            .into_iter()
            .map(|path| path.inners.into_iter().map(Into::into).collect())
            .collect(),
    }
}

/// Registry entry for `iavl:v`.
pub fn decode_iavl_value(raw: &RawOperator<'_>) -> Result<DecodedOperator, OperatorError> {
    let op = wire::IavlValueOp::decode(amino_body(raw.payload)?)?;
    let proof = op.proof.ok_or_else(|| missing_proof(raw.type_key))?;
    Ok(DecodedOperator::TreeInclusion(tree_proof(raw.key, proof)))
}

/// Registry entry for `iavl:a`.
pub fn decode_iavl_absence(raw: &RawOperator<'_>) -> Result<DecodedOperator, OperatorError> {
    let op = wire::IavlAbsenceOp::decode(amino_body(raw.payload)?)?;
    let proof = op.proof.ok_or_else(|| missing_proof(raw.type_key))?;
    Ok(DecodedOperator::TreeAbsence(tree_proof(raw.key, proof)))
}

/// Registry entry for `multistore`.
pub fn decode_multistore(raw: &RawOperator<'_>) -> Result<DecodedOperator, OperatorError> {
    let op = wire::MultiStoreProofOp::decode(amino_body(raw.payload)?)?;
    let proof = op.proof.ok_or_else(|| missing_proof(raw.type_key))?;
    let stores = proof
        .store_infos
        .into_iter()
        .map(|info| {
            let commit = info
                .core
                .and_then(|core| core.commit_id)
                .unwrap_or_default();
            StoreCommit {
                name: info.name,
                version: commit.version,
                commit_hash: commit.hash,
            }
        })
        .collect();
    Ok(DecodedOperator::MultiStore(MultiStoreProof {
        key: raw.key.to_vec(),
        stores,
    }))
}

/// Registry entry for `simple:v`.
pub fn decode_simple_value(raw: &RawOperator<'_>) -> Result<DecodedOperator, OperatorError> {
    let op = wire::SimpleValueOp::decode(amino_body(raw.payload)?)?;
    let proof = op.proof.ok_or_else(|| missing_proof(raw.type_key))?;
    Ok(DecodedOperator::SimpleValue(SimpleValueProof {
        key: raw.key.to_vec(),
        total: proof.total,
        index: proof.index,
        leaf_hash: proof.leaf_hash,
        aunts: proof.aunts,
    }))
}

/// Amino form of a message: protobuf bytes behind a var-int length.
pub fn encode_amino<M: Message>(message: &M) -> Vec<u8> {
    message.encode_length_delimited_to_vec()
}

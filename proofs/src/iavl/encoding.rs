//! Compact encoding of tree inclusion proofs
//!
//! ```text
//! proof  = lp(key) count(leaves) leaf* count(path) inner*
//! leaf   = lp(key) lp(value_hash) var(version)
//! inner  = var(height) var(size) var(version) lp(left) lp(right)
//! ```
//!
//! Signed fields are plain two's complement var-ints, so negative values take
//! ten bytes.

use std::io::Write;

use ed::Encode;
use proofscope_codec::{
    length_prefixed_len, var_u64_len, write_length_prefixed, write_var_u64, ByteCursor,
    Error as CodecError,
};

use super::{InnerNode, LeafNode, TreeInclusionProof};
use crate::{
    error::OperatorError,
    operator::{DecodedOperator, RawOperator},
};

/// Smallest possible leaf: two empty byte strings and a one byte version.
const MIN_LEAF_LEN: usize = 3;

/// Smallest possible inner node: three one byte var-ints and two empty byte
/// strings.
const MIN_INNER_NODE_LEN: usize = 5;

/// Registry entry for `iavl:v` in the compact format.
pub fn decode_compact_operator(raw: &RawOperator<'_>) -> Result<DecodedOperator, OperatorError> {
    let proof = TreeInclusionProof::decode_compact(raw.payload)?;
    Ok(DecodedOperator::TreeInclusion(proof))
}

impl Encode for LeafNode {
    fn encode_into<W: Write>(&self, dest: &mut W) -> ed::Result<()> {
        write_length_prefixed(dest, &self.key)?;
        write_length_prefixed(dest, &self.value_hash)?;
        write_var_u64(dest, self.version as u64)?;
        Ok(())
    }

    fn encoding_length(&self) -> ed::Result<usize> {
        Ok(length_prefixed_len(&self.key)
            + length_prefixed_len(&self.value_hash)
            + var_u64_len(self.version as u64))
    }
}

impl Encode for InnerNode {
    fn encode_into<W: Write>(&self, dest: &mut W) -> ed::Result<()> {
        write_var_u64(dest, self.height as i64 as u64)?;
        write_var_u64(dest, self.size as u64)?;
        write_var_u64(dest, self.version as u64)?;
        write_length_prefixed(dest, &self.left)?;
        write_length_prefixed(dest, &self.right)?;
        Ok(())
    }

    fn encoding_length(&self) -> ed::Result<usize> {
        Ok(var_u64_len(self.height as i64 as u64)
            + var_u64_len(self.size as u64)
            + var_u64_len(self.version as u64)
            + length_prefixed_len(&self.left)
            + length_prefixed_len(&self.right))
    }
}

/// `inner_paths` has no compact representation and is not written.
impl Encode for TreeInclusionProof {
    fn encode_into<W: Write>(&self, dest: &mut W) -> ed::Result<()> {
        write_length_prefixed(dest, &self.key)?;
        write_var_u64(dest, self.leaves.len() as u64)?;
        for leaf in &self.leaves {
            leaf.encode_into(dest)?;
        }
        write_var_u64(dest, self.path.len() as u64)?;
        for node in &self.path {
            node.encode_into(dest)?;
        }
        Ok(())
    }

    fn encoding_length(&self) -> ed::Result<usize> {
        let mut length = length_prefixed_len(&self.key);
        length += var_u64_len(self.leaves.len() as u64);
        for leaf in &self.leaves {
            length += leaf.encoding_length()?;
        }
        length += var_u64_len(self.path.len() as u64);
        for node in &self.path {
            length += node.encoding_length()?;
        }
        Ok(length)
    }
}

impl LeafNode {
    fn read(cursor: &mut ByteCursor<'_>) -> Result<Self, CodecError> {
        Ok(LeafNode {
            key: cursor.read_length_prefixed()?.to_vec(),
            value_hash: cursor.read_length_prefixed()?.to_vec(),
            version: cursor.read_var_i64()?,
        })
    }
}

impl InnerNode {
    fn read(cursor: &mut ByteCursor<'_>) -> Result<Self, CodecError> {
        Ok(InnerNode {
            height: cursor.read_var_i32()?,
            size: cursor.read_var_i64()?,
            version: cursor.read_var_i64()?,
            left: cursor.read_length_prefixed()?.to_vec(),
            right: cursor.read_length_prefixed()?.to_vec(),
        })
    }
}

impl TreeInclusionProof {
    /// Decode a compact payload. Any leaf count is accepted; bytes left after
    /// the path are an error.
    pub fn decode_compact(payload: &[u8]) -> Result<Self, CodecError> {
        let mut cursor = ByteCursor::new(payload);
        let key = cursor.read_length_prefixed()?.to_vec();

        let leaf_count = cursor.read_count(MIN_LEAF_LEN)?;
        let mut leaves = Vec::with_capacity(leaf_count);
        for _ in 0..leaf_count {
            leaves.push(LeafNode::read(&mut cursor)?);
        }

        let path_len = cursor.read_count(MIN_INNER_NODE_LEN)?;
        let mut path = Vec::with_capacity(path_len);
        for _ in 0..path_len {
            path.push(InnerNode::read(&mut cursor)?);
        }

        cursor.finish()?;
        Ok(TreeInclusionProof {
            key,
            leaves,
            path,
            inner_paths: Vec::new(),
        })
    }

    /// The compact encoding of this proof.
    pub fn to_compact_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.encoding_length().unwrap_or_default());
        self.encode_into(&mut bytes)
            .expect("encoding into a Vec should not fail");
        bytes
    }
}

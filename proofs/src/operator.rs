//! Proof operators

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{
    iavl::TreeInclusionProof,
    tendermint::{MultiStoreProof, SimpleValueProof},
};

/// One operator as it appears on the wire, before decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawOperator<'a> {
    /// Operator type key, e.g. `iavl:v`.
    pub type_key: &'a str,
    /// Key the operator proves. Always empty in the compact format, which
    /// carries the key inside the payload.
    pub key: &'a [u8],
    /// Opaque operator payload.
    pub payload: &'a [u8],
}

/// Structured value produced by a registered decoder.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(tag = "kind", rename_all = "snake_case"))]
pub enum DecodedOperator {
    /// Proof that one or more leaves are present in an IAVL tree.
    TreeInclusion(TreeInclusionProof),
    /// Proof that a key is absent from an IAVL tree.
    TreeAbsence(TreeInclusionProof),
    /// Commit info of every store under an application hash.
    MultiStore(MultiStoreProof),
    /// Simple Merkle proof of a single value.
    SimpleValue(SimpleValueProof),
}

/// Outcome of dispatching an operator payload.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum Decoded {
    /// A decoder was registered for the type key and accepted the payload.
    Recognized(DecodedOperator),
    /// No decoder is registered for the type key; only the raw payload is
    /// available.
    Unrecognized,
}

/// A decoded operator together with the bytes it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ProofOperator {
    /// Operator type key.
    pub type_key: String,
    /// Key carried next to the payload, empty in the compact format.
    #[cfg_attr(feature = "serde", serde(serialize_with = "hex::serde::serialize"))]
    pub key: Vec<u8>,
    /// Raw payload exactly as read.
    #[cfg_attr(feature = "serde", serde(serialize_with = "hex::serde::serialize"))]
    pub payload: Vec<u8>,
    /// Decoded form of the payload.
    pub decoded: Decoded,
}

impl ProofOperator {
    /// An operator nobody decoded.
    pub fn unrecognized(type_key: impl Into<String>, payload: Vec<u8>) -> Self {
        ProofOperator {
            type_key: type_key.into(),
            key: Vec::new(),
            payload,
            decoded: Decoded::Unrecognized,
        }
    }

    /// An inclusion operator whose payload is the compact encoding of
    /// `proof`.
    pub fn from_tree_inclusion(type_key: impl Into<String>, proof: TreeInclusionProof) -> Self {
        ProofOperator {
            type_key: type_key.into(),
            key: Vec::new(),
            payload: proof.to_compact_bytes(),
            decoded: Decoded::Recognized(DecodedOperator::TreeInclusion(proof)),
        }
    }

    /// Borrow the wire form of this operator.
    pub fn as_raw(&self) -> RawOperator<'_> {
        RawOperator {
            type_key: &self.type_key,
            key: &self.key,
            payload: &self.payload,
        }
    }

    /// Whether a decoder claimed the payload.
    pub fn is_recognized(&self) -> bool {
        matches!(self.decoded, Decoded::Recognized(_))
    }

    /// The tree inclusion proof, if this operator decoded into one.
    pub fn tree_inclusion(&self) -> Option<&TreeInclusionProof> {
        match &self.decoded {
            Decoded::Recognized(DecodedOperator::TreeInclusion(proof)) => Some(proof),
            _ => None,
        }
    }
}

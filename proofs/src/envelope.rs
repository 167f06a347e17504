//! Proof envelopes
//!
//! A compact envelope is a run of records until the end of input:
//!
//! ```text
//! record = var(body_len) body
//! body   = lp(type_key) lp(payload)
//! ```
//!
//! The body length frames the record, so a reader that does not understand a
//! type key can still step over it.

use std::{fmt, io::Write};

use ed::Encode;
use prost::Message;
use proofscope_codec::{
    length_prefixed_len, var_u64_len, write_length_prefixed, write_var_u64, ByteCursor,
    Error as CodecError,
};
#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    error::{EnvelopeFault, Error},
    iavl::TreeInclusionProof,
    operator::{Decoded, ProofOperator, RawOperator},
    registry::DecoderRegistry,
    tendermint::wire,
};

/// Encoding of an operator chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "lowercase"))]
pub enum WireFormat {
    /// Var-int framed records.
    #[default]
    Compact,
    /// Protobuf `ProofOps` with amino operator payloads.
    Tendermint,
}

impl WireFormat {
    /// Every supported format.
    pub const ALL: [WireFormat; 2] = [WireFormat::Compact, WireFormat::Tendermint];

    /// Lower case name of the format.
    pub const fn name(self) -> &'static str {
        match self {
            WireFormat::Compact => "compact",
            WireFormat::Tendermint => "tendermint",
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One compact record, not yet decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record<'a> {
    /// The operator the record carries.
    pub operator: RawOperator<'a>,
    /// Offset of the payload in the envelope bytes.
    pub payload_offset: usize,
}

/// Iterates over the records of a compact envelope without decoding their
/// payloads. Stops after the first error.
pub struct Records<'a> {
    cursor: ByteCursor<'a>,
    index: usize,
    failed: bool,
}

impl<'a> Records<'a> {
    /// Create an iterator over `bytes`.
    pub const fn new(bytes: &'a [u8]) -> Self {
        Records {
            cursor: ByteCursor::new(bytes),
            index: 0,
            failed: false,
        }
    }

    fn read_record(&mut self) -> Result<Record<'a>, Error> {
        let index = self.index;
        let body = self
            .cursor
            .read_length_prefixed()
            .map_err(|source| EnvelopeFault::Framing { index, source })?;
        let base = self.cursor.offset() - body.len();

        let body_error = |source: CodecError| {
            let source = source.with_base_offset(base);
            if source.is_truncation() {
                Error::TruncatedInput { index, source }
            } else {
                Error::MalformedEnvelope(EnvelopeFault::Framing { index, source })
            }
        };
        let mut body = ByteCursor::new(body);
        let type_key = body.read_length_prefixed_str().map_err(body_error)?;
        let payload = body.read_length_prefixed().map_err(body_error)?;
        let payload_offset = base + body.offset() - payload.len();
        body.finish().map_err(body_error)?;

        Ok(Record {
            operator: RawOperator {
                type_key,
                key: &[],
                payload,
            },
            payload_offset,
        })
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<Record<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor.is_at_end() {
            return None;
        }
        let record = self.read_record();
        self.failed = record.is_err();
        self.index += 1;
        Some(record)
    }
}

/// Run the registered decoder over one operator. Codec errors are moved to
/// `payload_offset` when the payload's position in the envelope is known.
fn dispatch(
    index: usize,
    raw: RawOperator<'_>,
    payload_offset: Option<usize>,
    registry: &DecoderRegistry,
) -> Result<ProofOperator, Error> {
    let decoded = match registry.lookup(raw.type_key) {
        Some(decode) => {
            let decoded = decode(&raw).map_err(|source| Error::OperatorDecode {
                index,
                type_key: raw.type_key.to_owned(),
                source: match payload_offset {
                    Some(base) => source.with_base_offset(base),
                    None => source,
                },
            })?;
            debug!(index, type_key = raw.type_key, "decoded proof operator");
            Decoded::Recognized(decoded)
        }
        None => {
            warn!(
                index,
                type_key = raw.type_key,
                payload_len = raw.payload.len(),
                "no decoder registered for proof operator type"
            );
            Decoded::Unrecognized
        }
    };
    Ok(ProofOperator {
        type_key: raw.type_key.to_owned(),
        key: raw.key.to_vec(),
        payload: raw.payload.to_vec(),
        decoded,
    })
}

/// Ordered operators of one proof.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ProofEnvelope {
    operators: Vec<ProofOperator>,
}

impl ProofEnvelope {
    /// Wrap already decoded operators.
    pub fn new(operators: Vec<ProofOperator>) -> Self {
        ProofEnvelope { operators }
    }

    /// Decode a compact envelope, dispatching every payload through
    /// `registry`. Operators keep their wire order.
    pub fn decode(bytes: &[u8], registry: &DecoderRegistry) -> Result<Self, Error> {
        let operators = Records::new(bytes)
            .enumerate()
            .map(|(index, record)| {
                let record = record?;
                dispatch(index, record.operator, Some(record.payload_offset), registry)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::finish(operators))
    }

    /// Decode a Tendermint `ProofOps` message.
    pub fn decode_tendermint(bytes: &[u8], registry: &DecoderRegistry) -> Result<Self, Error> {
        let ops = wire::ProofOps::decode(bytes).map_err(EnvelopeFault::Protobuf)?;
        let operators = ops
            .ops
            .iter()
            .enumerate()
            .map(|(index, op)| {
                let raw = RawOperator {
                    type_key: &op.r#type,
                    key: &op.key,
                    payload: &op.data,
                };
                dispatch(index, raw, None, registry)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::finish(operators))
    }

    /// Decode `bytes` in the given format.
    pub fn decode_with(
        format: WireFormat,
        bytes: &[u8],
        registry: &DecoderRegistry,
    ) -> Result<Self, Error> {
        match format {
            WireFormat::Compact => Self::decode(bytes, registry),
            WireFormat::Tendermint => Self::decode_tendermint(bytes, registry),
        }
    }

    fn finish(operators: Vec<ProofOperator>) -> Self {
        if operators.is_empty() {
            warn!("proof envelope holds no operators");
        } else {
            debug!(operators = operators.len(), "decoded proof envelope");
        }
        ProofEnvelope { operators }
    }

    /// Operators in wire order.
    pub fn operators(&self) -> &[ProofOperator] {
        &self.operators
    }

    /// Take the operators out of the envelope.
    pub fn into_operators(self) -> Vec<ProofOperator> {
        self.operators
    }

    /// Number of operators.
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Whether the envelope holds no operators.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Iterate over the operators in wire order.
    pub fn iter(&self) -> std::slice::Iter<'_, ProofOperator> {
        self.operators.iter()
    }

    /// Position and value of the first operator that decoded into a tree
    /// inclusion proof.
    pub fn first_tree_inclusion(&self) -> Option<(usize, &TreeInclusionProof)> {
        self.operators
            .iter()
            .enumerate()
            .find_map(|(index, op)| op.tree_inclusion().map(|proof| (index, proof)))
    }

    /// Compact encoding of the envelope. Operator keys are not part of the
    /// compact format and are dropped.
    pub fn to_compact_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.encoding_length().unwrap_or_default());
        self.encode_into(&mut bytes)
            .expect("encoding into a Vec should not fail");
        bytes
    }
}

impl<'a> IntoIterator for &'a ProofEnvelope {
    type IntoIter = std::slice::Iter<'a, ProofOperator>;
    type Item = &'a ProofOperator;

    fn into_iter(self) -> Self::IntoIter {
        self.operators.iter()
    }
}

impl ProofOperator {
    fn body_len(&self) -> usize {
        length_prefixed_len(self.type_key.as_bytes()) + length_prefixed_len(&self.payload)
    }
}

impl Encode for ProofOperator {
    fn encode_into<W: Write>(&self, dest: &mut W) -> ed::Result<()> {
        write_var_u64(dest, self.body_len() as u64)?;
        write_length_prefixed(dest, self.type_key.as_bytes())?;
        write_length_prefixed(dest, &self.payload)?;
        Ok(())
    }

    fn encoding_length(&self) -> ed::Result<usize> {
        let body_len = self.body_len();
        Ok(var_u64_len(body_len as u64) + body_len)
    }
}

impl Encode for ProofEnvelope {
    fn encode_into<W: Write>(&self, dest: &mut W) -> ed::Result<()> {
        for op in &self.operators {
            op.encode_into(dest)?;
        }
        Ok(())
    }

    fn encoding_length(&self) -> ed::Result<usize> {
        self.operators.iter().map(|op| op.encoding_length()).sum()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        error::OperatorError,
        iavl::LeafNode,
        operator::DecodedOperator,
    };

    fn single_leaf() -> TreeInclusionProof {
        TreeInclusionProof {
            key: b"key".to_vec(),
            leaves: vec![LeafNode {
                key: b"key".to_vec(),
                value_hash: vec![7; 32],
                version: 3,
            }],
            ..Default::default()
        }
    }

    fn record(type_key: &str, payload: &[u8]) -> Vec<u8> {
        ProofOperator::unrecognized(type_key, payload.to_vec())
            .encode()
            .unwrap()
    }

    #[test]
    fn encode_record_layout() {
        assert_eq!(
            record("x", &[1, 2]),
            vec![0x05, 0x01, b'x', 0x02, 1, 2]
        );
    }

    #[test]
    fn decode_keeps_wire_order() {
        let envelope = ProofEnvelope::new(vec![
            ProofOperator::unrecognized("first", vec![1]),
            ProofOperator::from_tree_inclusion("iavl:v", single_leaf()),
            ProofOperator::unrecognized("last", vec![]),
        ]);
        let bytes = envelope.to_compact_bytes();
        assert_eq!(bytes.len(), envelope.encoding_length().unwrap());

        let decoded = ProofEnvelope::decode(&bytes, &DecoderRegistry::compact()).unwrap();
        assert_eq!(decoded, envelope);
        assert_eq!(
            decoded.iter().map(|op| op.type_key.as_str()).collect::<Vec<_>>(),
            vec!["first", "iavl:v", "last"]
        );
        assert_eq!(decoded.first_tree_inclusion().map(|(i, _)| i), Some(1));
    }

    #[test]
    fn decode_empty_input() {
        let envelope = ProofEnvelope::decode(&[], &DecoderRegistry::compact()).unwrap();
        assert!(envelope.is_empty());
        assert!(envelope.first_tree_inclusion().is_none());
    }

    #[test]
    fn decode_unknown_type_keeps_payload() {
        let bytes = record("ics23:iavl", &[9, 9, 9]);
        let envelope = ProofEnvelope::decode(&bytes, &DecoderRegistry::compact()).unwrap();
        assert_eq!(envelope.len(), 1);
        let op = &envelope.operators()[0];
        assert!(!op.is_recognized());
        assert_eq!(op.payload, vec![9, 9, 9]);
    }

    #[test]
    fn decode_record_longer_than_input() {
        let mut bytes = record("x", &[1, 2]);
        bytes.pop();
        assert_matches!(
            ProofEnvelope::decode(&bytes, &DecoderRegistry::compact()),
            Err(Error::MalformedEnvelope(EnvelopeFault::Framing {
                index: 0,
                source: CodecError::Truncated { offset: 1, needed: 5, remaining: 4 },
            }))
        );
    }

    #[test]
    fn decode_body_field_past_record_end() {
        // record of 3 bytes whose payload claims 4
        let mut bytes = record("a", &[]);
        bytes.extend_from_slice(&[0x03, 0x00, 0x04, 0xff]);
        let err = ProofEnvelope::decode(&bytes, &DecoderRegistry::compact()).unwrap_err();
        assert!(err.is_truncation());
        assert_matches!(
            err,
            Error::TruncatedInput {
                index: 1,
                source: CodecError::Truncated { offset: 7, needed: 4, remaining: 1 },
            }
        );
    }

    #[test]
    fn decode_bytes_after_payload() {
        let bytes = [0x04, 0x01, b'a', 0x00, 0xee];
        assert_matches!(
            ProofEnvelope::decode(&bytes, &DecoderRegistry::compact()),
            Err(Error::MalformedEnvelope(EnvelopeFault::Framing {
                index: 0,
                source: CodecError::TrailingBytes { offset: 4, trailing: 1 },
            }))
        );
    }

    #[test]
    fn decode_type_key_must_be_utf8() {
        let bytes = [0x03, 0x01, 0xff, 0x00];
        let err = ProofEnvelope::decode(&bytes, &DecoderRegistry::compact()).unwrap_err();
        assert!(!err.is_truncation());
        assert_matches!(
            err,
            Error::MalformedEnvelope(EnvelopeFault::Framing {
                source: CodecError::InvalidUtf8 { offset: 2 },
                ..
            })
        );
    }

    #[test]
    fn decoder_failure_names_operator() {
        let mut bytes = record("skip", &[]);
        bytes.extend(record("iavl:v", &[0x09]));
        // payload starts at 16, its key claims 9 bytes from 17
        assert_matches!(
            ProofEnvelope::decode(&bytes, &DecoderRegistry::compact()),
            Err(Error::OperatorDecode {
                index: 1,
                ref type_key,
                source: OperatorError::Codec(CodecError::Truncated { offset: 17, needed: 9, .. }),
            }) if type_key == "iavl:v"
        );
    }

    #[test]
    fn records_report_payload_offsets() {
        let mut bytes = record("a", &[1, 2]);
        bytes.extend(record("bc", &[]));
        let records = Records::new(&bytes)
            .map(|record| record.map(|r| (r.operator.type_key, r.payload_offset)))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(records, vec![("a", 4), ("bc", 11)]);
    }

    #[test]
    fn decode_with_custom_registry() {
        fn whole_payload_is_key(
            raw: &RawOperator<'_>,
        ) -> Result<DecodedOperator, OperatorError> {
            Ok(DecodedOperator::TreeInclusion(TreeInclusionProof {
                key: raw.payload.to_vec(),
                ..Default::default()
            }))
        }

        let mut registry = DecoderRegistry::new();
        registry.register("custom", whole_payload_is_key);
        let envelope = ProofEnvelope::decode(&record("custom", b"abc"), &registry).unwrap();
        let (index, proof) = envelope.first_tree_inclusion().unwrap();
        assert_eq!(index, 0);
        assert_eq!(proof.key, b"abc".to_vec());
        assert_eq!(proof.leaf_count(), 0);
    }

    #[test]
    fn decode_tendermint_ops() {
        let ops = wire::ProofOps {
            ops: vec![
                wire::ProofOp {
                    r#type: "iavl:v".to_owned(),
                    key: b"key".to_vec(),
                    data: crate::tendermint::encode_amino(&wire::IavlValueOp {
                        proof: Some(single_leaf().into()),
                    }),
                },
                wire::ProofOp {
                    r#type: "unknown".to_owned(),
                    key: vec![],
                    data: vec![1],
                },
            ],
        };
        let bytes = ops.encode_to_vec();
        let envelope = ProofEnvelope::decode_with(
            WireFormat::Tendermint,
            &bytes,
            WireFormat::Tendermint.default_registry(),
        )
        .unwrap();
        assert_eq!(envelope.len(), 2);
        assert_eq!(envelope.operators()[0].key, b"key".to_vec());
        assert_eq!(
            envelope.first_tree_inclusion().map(|(_, p)| p),
            Some(&single_leaf())
        );
        assert!(!envelope.operators()[1].is_recognized());
    }

    #[test]
    fn decode_tendermint_garbage() {
        assert_matches!(
            ProofEnvelope::decode_tendermint(&[0x0a, 0x05], &DecoderRegistry::tendermint()),
            Err(Error::MalformedEnvelope(EnvelopeFault::Protobuf(_)))
        );
    }

    #[test]
    fn wire_format_names() {
        assert_eq!(WireFormat::default(), WireFormat::Compact);
        assert_eq!(WireFormat::Tendermint.to_string(), "tendermint");
    }

    #[test]
    fn decoded_operator_is_tree_inclusion() {
        let op = ProofOperator::from_tree_inclusion("iavl:v", single_leaf());
        assert_matches!(
            op.decoded,
            Decoded::Recognized(DecodedOperator::TreeInclusion(_))
        );
    }
}

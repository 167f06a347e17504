use proofscope_codec::Error as CodecError;

use crate::calldata::ExtractionError;

/// Errors raised while decoding a proof envelope or analysing it.
///
/// Codec offsets are absolute offsets into the envelope bytes. The one
/// exception is [`Error::OperatorDecode`] from a Tendermint envelope, whose
/// offsets are relative to the operator's `data` field.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A record body ended before its type key or payload was complete.
    #[error("truncated input in operator {index}: {source}")]
    TruncatedInput {
        /// Position of the operator in the envelope.
        index: usize,
        /// Failed read.
        source: CodecError,
    },

    /// The operator chain itself could not be framed.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(#[from] EnvelopeFault),

    /// A registered decoder rejected its payload.
    #[error("operator {index} ({type_key}) decode error: {source}")]
    OperatorDecode {
        /// Position of the operator in the envelope.
        index: usize,
        /// Type key the decoder was registered under.
        type_key: String,
        /// Decoder failure.
        source: OperatorError,
    },

    /// No operator decoded into a tree inclusion proof.
    #[error("no tree inclusion operator among {operators} operators")]
    NoInclusionOperator {
        /// Number of operators the envelope held.
        operators: usize,
    },

    /// The proof argument could not be recovered from call data.
    #[error("input extraction error: {0}")]
    InputExtraction(#[from] ExtractionError),
}

impl Error {
    /// Whether the root cause is input that ended too early.
    ///
    /// Callers treat a truncated proof like any other undecodable proof, but
    /// the distinction is kept for diagnostics.
    pub fn is_truncation(&self) -> bool {
        match self {
            Error::TruncatedInput { .. } => true,
            Error::MalformedEnvelope(EnvelopeFault::Framing { source, .. }) => {
                source.is_truncation()
            }
            Error::OperatorDecode {
                source: OperatorError::Codec(source),
                ..
            } => source.is_truncation(),
            _ => false,
        }
    }

    /// Index of the operator the error belongs to, when there is one.
    pub fn operator_index(&self) -> Option<usize> {
        match self {
            Error::TruncatedInput { index, .. }
            | Error::OperatorDecode { index, .. }
            | Error::MalformedEnvelope(EnvelopeFault::Framing { index, .. }) => Some(*index),
            _ => None,
        }
    }
}

/// Ways the operator chain can fail to frame.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeFault {
    /// A compact record length was unreadable, overran the input, or the
    /// record body held bytes after its payload.
    #[error("record {index}: {source}")]
    Framing {
        /// Position of the record in the envelope.
        index: usize,
        /// Failed read.
        source: CodecError,
    },

    /// The Tendermint `ProofOps` message did not parse.
    #[error("protobuf envelope: {0}")]
    Protobuf(prost::DecodeError),
}

/// Errors returned by operator decoders.
#[derive(Debug, thiserror::Error)]
pub enum OperatorError {
    /// The payload framing was inconsistent.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// An amino payload did not parse as its protobuf message.
    #[error("protobuf error: {0}")]
    Protobuf(#[from] prost::DecodeError),

    /// The payload parsed but lacks something the operator requires.
    #[error("invalid operator: {0}")]
    Invalid(String),
}

impl OperatorError {
    /// The same error with codec offsets moved by `base`, the position of the
    /// payload in the envelope.
    pub fn with_base_offset(self, base: usize) -> Self {
        match self {
            OperatorError::Codec(source) => OperatorError::Codec(source.with_base_offset(base)),
            other => other,
        }
    }
}

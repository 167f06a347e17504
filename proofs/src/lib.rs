//! Merkle proof operator decoding and multi-leaf inclusion detection.
//!
//! A proof arrives as a chain of operators, each tagged with a type key. The
//! [`ProofEnvelope`] deserializer splits the chain, hands every payload to the
//! decoder registered for its type in a [`DecoderRegistry`] and keeps payloads
//! nobody claims as [`Decoded::Unrecognized`]. The tree inclusion operator
//! (`iavl:v`) decodes into a [`TreeInclusionProof`]; [`evaluate`] flags it as
//! anomalous unless it carries exactly one leaf.
//!
//! Proof bytes are read either in the compact framing of this crate
//! ([`WireFormat::Compact`]) or as a Tendermint `ProofOps` message
//! ([`WireFormat::Tendermint`]). Call data of a `handlePackage` transaction can
//! be reduced to its proof argument with [`CallDataExtractor`].
//!
//! ```
//! use proofscope::{analyze, Error};
//!
//! assert!(matches!(analyze(&[]), Err(Error::NoInclusionOperator { operators: 0 })));
//! ```

#![warn(missing_docs)]

mod analyzer;

/// `handlePackage` call data decoding.
pub mod calldata;

mod envelope;

/// Error types for decoding and analysis.
pub mod error;

mod evaluate;

/// Recorded proofs for tests and demonstrations.
pub mod fixtures;

/// IAVL tree inclusion proofs and their compact encoding.
pub mod iavl;

mod operator;

/// `handlePackage` payload decoding.
pub mod package;

/// Type key to decoder registry.
pub mod registry;

#[cfg(feature = "serde")]
mod serde_hex;

/// Tendermint `ProofOps` envelopes and amino operator payloads.
pub mod tendermint;

mod visualize;

pub use analyzer::{analyze, Analyzer, AnalyzerConfig};
pub use calldata::{CallDataExtractor, ExtractionError, HandlePackageCall};
pub use envelope::{ProofEnvelope, Record, Records, WireFormat};
pub use error::{EnvelopeFault, Error, OperatorError};
pub use evaluate::{evaluate, evaluate_expecting, AnalysisResult};
pub use iavl::{InnerNode, LeafNode, TreeInclusionProof};
pub use operator::{Decoded, DecodedOperator, ProofOperator, RawOperator};
pub use package::{CrossChainPackage, PackageError, TransferOutPackage};
pub use proofscope_codec::ByteCursor;
pub use registry::{DecodeFn, DecoderRegistry};

/// Type key of the IAVL value (inclusion) operator.
pub const IAVL_VALUE_TYPE: &str = "iavl:v";

/// Type key of the IAVL absence operator.
pub const IAVL_ABSENCE_TYPE: &str = "iavl:a";

/// Type key of the multistore commit operator.
pub const MULTISTORE_TYPE: &str = "multistore";

/// Type key of the simple Merkle value operator.
pub const SIMPLE_VALUE_TYPE: &str = "simple:v";

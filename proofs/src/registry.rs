//! Operator decoder registry
//!
//! Decoders are plain function pointers keyed by operator type. The default
//! registries are built once on first use and never change afterwards; a
//! caller that needs different decoders builds its own registry before
//! analysis starts and lends it to the [`Analyzer`](crate::Analyzer).

use std::fmt;

use indexmap::IndexMap;
use lazy_static::lazy_static;

use crate::{
    error::OperatorError,
    iavl,
    operator::{DecodedOperator, RawOperator},
    tendermint, WireFormat, IAVL_ABSENCE_TYPE, IAVL_VALUE_TYPE, MULTISTORE_TYPE,
    SIMPLE_VALUE_TYPE,
};

/// Turns a raw operator into its structured form.
pub type DecodeFn = fn(&RawOperator<'_>) -> Result<DecodedOperator, OperatorError>;

lazy_static! {
    static ref COMPACT_REGISTRY: DecoderRegistry = DecoderRegistry::compact();
    static ref TENDERMINT_REGISTRY: DecoderRegistry = DecoderRegistry::tendermint();
}

/// Mapping from operator type key to decoder, in registration order.
#[derive(Clone, Default)]
pub struct DecoderRegistry {
    decoders: IndexMap<String, DecodeFn>,
}

impl DecoderRegistry {
    /// A registry with no decoders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoders for the compact wire format.
    pub fn compact() -> Self {
        let mut registry = Self::new();
        registry.register(IAVL_VALUE_TYPE, iavl::decode_compact_operator);
        registry
    }

    /// Decoders for amino payloads inside Tendermint `ProofOps`.
    pub fn tendermint() -> Self {
        let mut registry = Self::new();
        registry.register(IAVL_VALUE_TYPE, tendermint::decode_iavl_value);
        registry.register(IAVL_ABSENCE_TYPE, tendermint::decode_iavl_absence);
        registry.register(MULTISTORE_TYPE, tendermint::decode_multistore);
        registry.register(SIMPLE_VALUE_TYPE, tendermint::decode_simple_value);
        registry
    }

    /// Register `decoder` for `type_key`, returning the decoder it replaces.
    /// A replaced key keeps its original position.
    pub fn register(&mut self, type_key: impl Into<String>, decoder: DecodeFn) -> Option<DecodeFn> {
        self.decoders.insert(type_key.into(), decoder)
    }

    /// The decoder for `type_key`. An unknown key is not an error.
    pub fn lookup(&self, type_key: &str) -> Option<DecodeFn> {
        self.decoders.get(type_key).copied()
    }

    /// Registered type keys in registration order.
    pub fn type_keys(&self) -> impl Iterator<Item = &str> {
        self.decoders.keys().map(String::as_str)
    }

    /// Number of registered decoders.
    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    /// Whether no decoder is registered.
    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.type_keys()).finish()
    }
}

impl WireFormat {
    /// The process-wide default registry for this format.
    pub fn default_registry(self) -> &'static DecoderRegistry {
        match self {
            WireFormat::Compact => &*COMPACT_REGISTRY,
            WireFormat::Tendermint => &*TENDERMINT_REGISTRY,
        }
    }
}

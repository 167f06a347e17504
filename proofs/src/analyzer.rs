//! Analyzer

use tracing::debug;

use crate::{
    calldata::{CallDataExtractor, HandlePackageCall},
    envelope::{ProofEnvelope, WireFormat},
    error::Error,
    evaluate::{evaluate_expecting, AnalysisResult},
    registry::DecoderRegistry,
};

/// Analysis settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Encoding of the proof bytes.
    pub wire_format: WireFormat,
    /// Selector call data must carry. `None` accepts any selector.
    pub expected_selector: Option<[u8; 4]>,
    /// Leaves a legitimate inclusion proof carries.
    pub expected_leaves: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            wire_format: WireFormat::default(),
            expected_selector: None,
            expected_leaves: 1,
        }
    }
}

/// Decodes proofs with a fixed registry and judges them.
///
/// Holds no mutable state, so one analyzer can serve any number of threads.
#[derive(Clone, Debug)]
pub struct Analyzer<'r> {
    config: AnalyzerConfig,
    registry: &'r DecoderRegistry,
    extractor: CallDataExtractor,
}

impl Analyzer<'static> {
    /// An analyzer using the default registry of the configured format.
    pub fn new(config: AnalyzerConfig) -> Self {
        let registry = config.wire_format.default_registry();
        Self::with_registry(config, registry)
    }
}

impl Default for Analyzer<'static> {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl<'r> Analyzer<'r> {
    /// An analyzer decoding with `registry`.
    pub fn with_registry(config: AnalyzerConfig, registry: &'r DecoderRegistry) -> Self {
        let extractor = match config.expected_selector {
            Some(selector) => CallDataExtractor::expecting_selector(selector),
            None => CallDataExtractor::new(),
        };
        Analyzer {
            config,
            registry,
            extractor,
        }
    }

    /// Settings in use.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Registry in use.
    pub fn registry(&self) -> &'r DecoderRegistry {
        self.registry
    }

    /// Decode proof bytes without judging them.
    pub fn decode(&self, proof: &[u8]) -> Result<ProofEnvelope, Error> {
        ProofEnvelope::decode_with(self.config.wire_format, proof, self.registry)
    }

    /// Decode and judge proof bytes.
    pub fn analyze_proof(&self, proof: &[u8]) -> Result<AnalysisResult, Error> {
        let envelope = self.decode(proof)?;
        evaluate_expecting(&envelope, self.config.expected_leaves)
    }

    /// Decode the arguments of `handlePackage` call data.
    pub fn extract<'a>(&self, call_data: &'a [u8]) -> Result<HandlePackageCall<'a>, Error> {
        Ok(self.extractor.extract(call_data)?)
    }

    /// Pull the proof out of `handlePackage` call data, then judge it.
    pub fn analyze_call_data(&self, call_data: &[u8]) -> Result<AnalysisResult, Error> {
        let call = self.extract(call_data)?;
        debug!(
            height = call.height,
            package_sequence = call.package_sequence,
            channel_id = call.channel_id,
            proof_len = call.proof.len(),
            "extracted handlePackage proof"
        );
        self.analyze_proof(call.proof)
    }
}

/// Judge compact proof bytes with the default settings.
pub fn analyze(proof: &[u8]) -> Result<AnalysisResult, Error> {
    Analyzer::default().analyze_proof(proof)
}

use assert_matches::assert_matches;
use ed::Encode;
use pretty_assertions::assert_eq;
use proofscope::{
    analyze,
    calldata::encode_handle_package,
    Analyzer, AnalyzerConfig, Decoded, DecoderRegistry, Error, ExtractionError, InnerNode,
    LeafNode, OperatorError, ProofEnvelope, ProofOperator, TreeInclusionProof, WireFormat,
};

fn leaf(index: u8) -> LeafNode {
    LeafNode {
        key: vec![0x00, 0x01, index],
        value_hash: vec![index; 32],
        version: 110_217_392,
    }
}

fn inclusion_proof(leaves: u8) -> TreeInclusionProof {
    TreeInclusionProof {
        key: vec![0x00, 0x01, 0x00],
        leaves: (0..leaves).map(leaf).collect(),
        path: vec![
            InnerNode {
                height: 1,
                size: 2,
                version: 110_217_392,
                left: vec![],
                right: vec![0x12; 32],
            },
            InnerNode {
                height: 2,
                size: 3,
                version: 110_217_392,
                left: vec![0x0c; 32],
                right: vec![],
            },
        ],
        inner_paths: vec![],
    }
}

fn compact_envelope(leaves: u8) -> Vec<u8> {
    ProofEnvelope::new(vec![ProofOperator::from_tree_inclusion(
        "iavl:v",
        inclusion_proof(leaves),
    )])
    .to_compact_bytes()
}

#[test]
fn single_leaf_proof_is_normal() {
    let result = analyze(&compact_envelope(1)).unwrap();
    assert!(!result.anomalous());
    assert_eq!(result.leaf_count(), 1);
    assert!(result.serialized_proof().contains("tree inclusion [1 leaves]"));
}

#[test]
fn seventeen_leaf_proof_is_anomalous() {
    let result = analyze(&compact_envelope(17)).unwrap();
    assert!(result.anomalous());
    assert_eq!(result.leaf_count(), 17);
    assert!(result.serialized_proof().contains("\n                16: key "));
}

#[test]
fn short_call_data_never_reaches_analysis() {
    assert_matches!(
        Analyzer::default().analyze_call_data(&[0x84, 0x01, 0x3b]),
        Err(Error::InputExtraction(ExtractionError::TooShort { len: 3, .. }))
    );
}

#[test]
fn call_data_round_trip() {
    for (leaves, anomalous) in [(1, false), (2, true)] {
        let call_data = encode_handle_package(&[0x01; 33], &compact_envelope(leaves), 42, 7, 2);
        let result = Analyzer::default().analyze_call_data(&call_data).unwrap();
        assert_eq!(result.anomalous(), anomalous);
    }
}

#[test]
fn empty_proof_has_no_inclusion_operator() {
    assert_matches!(
        analyze(&[]),
        Err(Error::NoInclusionOperator { operators: 0 })
    );
}

#[test]
fn compact_round_trip_preserves_order() {
    let envelope = ProofEnvelope::new(vec![
        ProofOperator::unrecognized("simple:v", vec![0xde, 0xad]),
        ProofOperator::from_tree_inclusion("iavl:v", inclusion_proof(2)),
        ProofOperator::unrecognized("multistore", vec![]),
    ]);
    let bytes = envelope.encode().unwrap();
    let decoded = ProofEnvelope::decode(&bytes, WireFormat::Compact.default_registry()).unwrap();
    assert_eq!(decoded, envelope);
    assert_eq!(decoded.to_compact_bytes(), bytes);
}

#[test]
fn every_strict_prefix_is_a_truncation() {
    let bytes = compact_envelope(3);
    for len in 1..bytes.len() {
        let err = analyze(&bytes[..len]).unwrap_err();
        assert!(err.is_truncation(), "prefix of {len} bytes gave {err}");
    }
}

#[test]
fn truncated_payload_inside_well_framed_record() {
    let mut payload = inclusion_proof(1).to_compact_bytes();
    payload.pop();
    let bytes = ProofOperator::unrecognized("iavl:v", payload)
        .encode()
        .unwrap();
    let err = analyze(&bytes).unwrap_err();
    assert!(err.is_truncation());
    // the payload ends the envelope, so the short read starts at its end
    assert_matches!(
        err,
        Error::OperatorDecode { index: 0, source: OperatorError::Codec(ref source), .. }
            if source.offset() == bytes.len()
    );
}

#[test]
fn unknown_operator_survives_decoding() {
    let mut bytes = ProofOperator::unrecognized("ics23:iavl", vec![1, 2, 3])
        .encode()
        .unwrap();
    bytes.extend(compact_envelope(1));
    let envelope = Analyzer::default().decode(&bytes).unwrap();
    assert_eq!(envelope.len(), 2);
    assert_eq!(envelope.operators()[0].decoded, Decoded::Unrecognized);
    assert_eq!(envelope.operators()[0].payload, vec![1, 2, 3]);

    let result = analyze(&bytes).unwrap();
    assert_eq!(result.inclusion_index(), 1);
    assert!(!result.anomalous());
}

#[test]
fn registry_without_inclusion_decoder() {
    let registry = DecoderRegistry::new();
    let analyzer = Analyzer::with_registry(AnalyzerConfig::default(), &registry);
    assert_matches!(
        analyzer.analyze_proof(&compact_envelope(1)),
        Err(Error::NoInclusionOperator { operators: 1 })
    );
}

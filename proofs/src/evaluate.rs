//! Anomaly evaluation

use proofscope_visualize::visualize_to_string;
#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::warn;

use crate::{envelope::ProofEnvelope, error::Error};

/// Verdict on one proof envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AnalysisResult {
    serialized_proof: String,
    anomalous: bool,
    leaf_count: usize,
    inclusion_index: usize,
}

impl AnalysisResult {
    /// Deterministic dump of every decoded operator, in wire order.
    pub fn serialized_proof(&self) -> &str {
        &self.serialized_proof
    }

    /// Whether the inclusion proof carries an unexpected number of leaves.
    pub fn anomalous(&self) -> bool {
        self.anomalous
    }

    /// Leaves of the deciding inclusion proof.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Position of the deciding inclusion operator in the envelope.
    pub fn inclusion_index(&self) -> usize {
        self.inclusion_index
    }
}

/// Judge `envelope` by its first tree inclusion operator, which must prove
/// exactly one leaf.
pub fn evaluate(envelope: &ProofEnvelope) -> Result<AnalysisResult, Error> {
    evaluate_expecting(envelope, 1)
}

/// Like [`evaluate`], with the leaf count a legitimate proof carries.
pub fn evaluate_expecting(
    envelope: &ProofEnvelope,
    expected_leaves: usize,
) -> Result<AnalysisResult, Error> {
    let (inclusion_index, proof) =
        envelope
            .first_tree_inclusion()
            .ok_or(Error::NoInclusionOperator {
                operators: envelope.len(),
            })?;

    let inclusion_operators = envelope
        .iter()
        .filter(|op| op.tree_inclusion().is_some())
        .count();
    if inclusion_operators > 1 {
        warn!(
            inclusion_operators,
            inclusion_index, "envelope holds more than one inclusion operator, judging the first"
        );
    }

    let leaf_count = proof.leaf_count();
    let anomalous = leaf_count != expected_leaves;
    if anomalous {
        warn!(
            leaf_count,
            expected_leaves, inclusion_index, "anomalous inclusion proof"
        );
    }

    Ok(AnalysisResult {
        serialized_proof: visualize_to_string(envelope),
        anomalous,
        leaf_count,
        inclusion_index,
    })
}

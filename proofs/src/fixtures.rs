//! Recorded proofs

/// Hex of the `ProofOps` submitted by BSC token hub exploit transaction
/// 0x05356fd06ce56a9ec5b4eaf9c075abd740cae4c21eab1676440ab5cd2fe5c57a.
///
/// The `iavl:v` operator proves two leaves under one root, which a
/// legitimate value proof never does.
pub const BSC_EXPLOIT_PROOF_HEX: &str = include_str!("../fixtures/bsc_exploit_proof.hex");

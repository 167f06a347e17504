use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

use proofscope::{
    calldata::encode_handle_package,
    fixtures,
    package::{Address, U256},
    CrossChainPackage, LeafNode, ProofEnvelope, ProofOperator, TransferOutPackage,
    TreeInclusionProof,
};

const ATTACK_LINE: &str = "This is an attack transaction with multi leaf node";
const NORMAL_LINE: &str = "This is a normal transaction";

fn command(args: &[&str]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_proofscope"));
    command.args(args).env_remove("RUST_LOG");
    command
}

fn proofscope(args: &[&str]) -> Output {
    command(args).output().expect("failed to run proofscope")
}

fn exploit_call_data() -> Vec<u8> {
    let proof = hex::decode(fixtures::BSC_EXPLOIT_PROOF_HEX.trim()).unwrap();
    encode_handle_package(&[0x00; 64], &proof, 110_217_401, 1, 2)
}

fn transfer_payload() -> Vec<u8> {
    let mut token_symbol = [0; 32];
    token_symbol[..3].copy_from_slice(b"BNB");
    CrossChainPackage {
        package_type: 0,
        relay_fee: U256::from(1u64),
        transfer: TransferOutPackage {
            token_symbol,
            contract_address: Address::ZERO,
            amount: U256::from(5u64),
            recipient: Address::repeat_byte(0x11),
            refund_address: Address::repeat_byte(0x22),
            expire_time: 1_700_000_000,
        },
    }
    .encode()
}

fn single_leaf_call_data() -> Vec<u8> {
    let proof = TreeInclusionProof {
        key: b"k".to_vec(),
        leaves: vec![LeafNode {
            key: b"k".to_vec(),
            value_hash: vec![0x01; 32],
            version: 1,
        }],
        ..Default::default()
    };
    let proof = ProofEnvelope::new(vec![ProofOperator::from_tree_inclusion("iavl:v", proof)])
        .to_compact_bytes();
    encode_handle_package(&transfer_payload(), &proof, 10, 1, 2)
}

#[test]
fn fixture_exits_untrusted() {
    let output = proofscope(&["fixture"]);
    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(ATTACK_LINE));
}

#[test]
fn registry_exits_normal() {
    let output = proofscope(&["registry", "--wire-format", "tendermint"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("tendermint:\n"));
}

#[test]
fn normal_proof_exits_zero() {
    // one record: type "iavl:v", payload { key "k", one leaf {"k", "", 1}, empty path }
    let payload = "016b01016b000100";
    let body = format!("06{}{:02x}{payload}", hex::encode("iavl:v"), payload.len() / 2);
    let record = format!("{:02x}{body}", body.len() / 2);
    let output = proofscope(&["proof", &record]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).ends_with(&format!("{NORMAL_LINE}\n")));
}

#[test]
fn bad_input_exits_one() {
    let output = proofscope(&["proof", "not-hex"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn tendermint_flag_is_accepted() {
    let output = proofscope(&["proof", "--wire-format", "tendermint", "--output", "json", "0a00"]);
    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"anomalous\": true"));
}

#[test]
fn tx_with_exploit_proof_exits_untrusted() {
    let call_data = hex::encode(exploit_call_data());
    let output = proofscope(&["tx", "--wire-format", "tendermint", &call_data]);
    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.ends_with(&format!("{ATTACK_LINE}\n")));
}

#[test]
fn tx_with_single_leaf_exits_zero() {
    let call_data = format!("0x{}", hex::encode(single_leaf_call_data()));
    let output = proofscope(&["tx", "--check-selector", &call_data]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("transfer package: 5 BNB "));
    assert!(stdout.ends_with(&format!("{NORMAL_LINE}\n")));
}

#[test]
fn tx_reads_binary_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&exploit_call_data()).unwrap();
    let path = file.path().to_str().unwrap();

    let output = proofscope(&["tx", "--wire-format", "tendermint", "--file", path, "--binary"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stdout).contains(ATTACK_LINE));
}

#[test]
fn tx_reads_hex_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "0x{}", hex::encode(exploit_call_data())).unwrap();
    let path = file.path().to_str().unwrap();

    let output = proofscope(&["tx", "--wire-format", "tendermint", "-f", path]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stdout).contains(ATTACK_LINE));
}

#[test]
fn tx_reads_standard_input() {
    let mut child = command(&["tx", "--wire-format", "tendermint", "--file", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run proofscope");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(hex::encode(exploit_call_data()).as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stdout).contains(ATTACK_LINE));
}

#[test]
fn tx_with_foreign_selector() {
    let mut call_data = exploit_call_data();
    call_data[..4].fill(0);
    let call_data = hex::encode(call_data);

    let output = proofscope(&["tx", "--wire-format", "tendermint", "--check-selector", &call_data]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let output = proofscope(&["tx", "--wire-format", "tendermint", &call_data]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn binary_requires_file() {
    let output = proofscope(&["tx", "--binary", "00"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

//! # Analysis Subcommands
//!
//! `proof`, `tx` and `fixture` share one reporting path: decode, judge, then
//! print either the indented dump with a verdict line or a JSON document.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use proofscope::{
    calldata::HANDLE_PACKAGE_SELECTOR, evaluate_expecting, fixtures, AnalysisResult, Analyzer,
    AnalyzerConfig, CrossChainPackage, Error, ProofEnvelope,
};
use serde::Serialize;

use crate::{input::InputArgs, OutputFormat, WireFormatArg, EXIT_NORMAL, EXIT_UNTRUSTED};

const ATTACK_VERDICT: &str = "This is an attack transaction with multi leaf node";
const NORMAL_VERDICT: &str = "This is a normal transaction";

/// Options shared by every analysis subcommand.
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Encoding of the proof bytes.
    #[arg(long, value_enum, default_value_t = WireFormatArg::Compact)]
    pub wire_format: WireFormatArg,

    /// How to print the result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Leaves a legitimate inclusion proof carries.
    #[arg(long, default_value_t = 1)]
    pub expected_leaves: usize,
}

impl Default for ReportArgs {
    fn default() -> Self {
        ReportArgs {
            wire_format: WireFormatArg::Compact,
            output: OutputFormat::Text,
            expected_leaves: 1,
        }
    }
}

/// Arguments for `proofscope proof`.
#[derive(Args, Debug, Clone)]
pub struct ProofArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub report: ReportArgs,
}

/// Arguments for `proofscope tx`.
#[derive(Args, Debug, Clone)]
pub struct TxArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub report: ReportArgs,

    /// Reject call data whose selector is not `handlePackage`.
    #[arg(long)]
    pub check_selector: bool,
}

/// Arguments for `proofscope fixture`.
#[derive(Args, Debug, Clone, Default)]
pub struct FixtureArgs {
    /// How to print the result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    anomalous: bool,
    leaf_count: usize,
    inclusion_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    package: Option<&'a CrossChainPackage>,
    envelope: &'a ProofEnvelope,
}

#[derive(Serialize)]
struct JsonFailure<'a> {
    anomalous: bool,
    error: String,
    truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    package: Option<&'a CrossChainPackage>,
}

fn analyzer(report: &ReportArgs, expected_selector: Option<[u8; 4]>) -> Analyzer<'static> {
    Analyzer::new(AnalyzerConfig {
        wire_format: report.wire_format.into(),
        expected_selector,
        expected_leaves: report.expected_leaves,
    })
}

/// Execute `proofscope proof`.
pub fn run_proof<W: Write>(args: &ProofArgs, out: &mut W) -> Result<u8> {
    let proof = args.input.read()?;
    let analyzer = analyzer(&args.report, None);
    judge(&analyzer, &proof, None, args.report.output, out)
}

/// Execute `proofscope tx`.
///
/// Call data that is not a `handlePackage` call is an operational error, not
/// a verdict. A payload that is not a transfer package is only logged.
pub fn run_tx<W: Write>(args: &TxArgs, out: &mut W) -> Result<u8> {
    let call_data = args.input.read()?;
    let selector = args.check_selector.then_some(HANDLE_PACKAGE_SELECTOR);
    let analyzer = analyzer(&args.report, selector);
    let call = analyzer
        .extract(&call_data)
        .context("call data is not a handlePackage call")?;
    tracing::info!(
        height = call.height,
        package_sequence = call.package_sequence,
        channel_id = call.channel_id,
        "extracted handlePackage proof"
    );
    let package = match call.package() {
        Ok(package) => {
            tracing::info!(transfer = %package.transfer, "decoded transfer package");
            Some(package)
        }
        Err(err) => {
            tracing::debug!("payload is not a transfer package: {err}");
            None
        }
    };
    judge(&analyzer, call.proof, package.as_ref(), args.report.output, out)
}

/// Execute `proofscope fixture`.
pub fn run_fixture<W: Write>(args: &FixtureArgs, out: &mut W) -> Result<u8> {
    let proof = crate::input::decode_hex(fixtures::BSC_EXPLOIT_PROOF_HEX)?;
    let report = ReportArgs {
        wire_format: WireFormatArg::Tendermint,
        output: args.output,
        ..Default::default()
    };
    judge(&analyzer(&report, None), &proof, None, args.output, out)
}

fn judge<W: Write>(
    analyzer: &Analyzer<'_>,
    proof: &[u8],
    package: Option<&CrossChainPackage>,
    output: OutputFormat,
    out: &mut W,
) -> Result<u8> {
    if let (OutputFormat::Text, Some(package)) = (output, package) {
        writeln!(out, "transfer package: {}", package.transfer)?;
    }
    let outcome = analyzer.decode(proof).and_then(|envelope| {
        evaluate_expecting(&envelope, analyzer.config().expected_leaves)
            .map(|result| (envelope, result))
    });
    match outcome {
        Ok((envelope, result)) => {
            print_result(&envelope, &result, package, output, out)?;
            Ok(if result.anomalous() {
                EXIT_UNTRUSTED
            } else {
                EXIT_NORMAL
            })
        }
        Err(err) => {
            tracing::warn!(
                wire_format = %analyzer.config().wire_format,
                truncated = err.is_truncation(),
                "proof rejected: {err}"
            );
            print_failure(&err, package, output, out)?;
            Ok(EXIT_UNTRUSTED)
        }
    }
}

fn print_result<W: Write>(
    envelope: &ProofEnvelope,
    result: &AnalysisResult,
    package: Option<&CrossChainPackage>,
    output: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match output {
        OutputFormat::Text => {
            writeln!(out, "{}", result.serialized_proof())?;
            let verdict = if result.anomalous() {
                ATTACK_VERDICT
            } else {
                NORMAL_VERDICT
            };
            writeln!(out, "{verdict}")?;
        }
        OutputFormat::Json => {
            let report = JsonReport {
                anomalous: result.anomalous(),
                leaf_count: result.leaf_count(),
                inclusion_index: result.inclusion_index(),
                package,
                envelope,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn print_failure<W: Write>(
    err: &Error,
    package: Option<&CrossChainPackage>,
    output: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match output {
        OutputFormat::Text => writeln!(out, "found attacking transaction: {err}")?,
        OutputFormat::Json => {
            let failure = JsonFailure {
                anomalous: true,
                error: err.to_string(),
                truncated: err.is_truncation(),
                package,
            };
            serde_json::to_writer_pretty(&mut *out, &failure)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

//! # proofscope-cli
//!
//! Argument definitions and handlers behind the `proofscope` binary.
//!
//! ## Subcommands
//!
//! - `proof` decodes and judges raw proof bytes
//! - `tx` pulls the proof out of `handlePackage` call data first
//! - `fixture` judges the bundled BSC exploit proof
//! - `registry` lists the operator decoders of each wire format
//!
//! Handlers write results to the writer they are given and return the exit
//! code: 0 for a normal proof, 2 for an anomalous or undecodable one.
//! Operational failures are returned as errors and end the process with 1.

pub mod analyze;
pub mod input;
pub mod registry;

use clap::ValueEnum;
use proofscope::WireFormat;

/// Exit code of a proof with exactly one leaf.
pub const EXIT_NORMAL: u8 = 0;

/// Exit code of an anomalous or undecodable proof.
pub const EXIT_UNTRUSTED: u8 = 2;

/// `--wire-format` values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum WireFormatArg {
    /// Var-int framed records.
    #[default]
    Compact,
    /// Tendermint `ProofOps` protobuf.
    Tendermint,
}

impl From<WireFormatArg> for WireFormat {
    fn from(arg: WireFormatArg) -> Self {
        match arg {
            WireFormatArg::Compact => WireFormat::Compact,
            WireFormatArg::Tendermint => WireFormat::Tendermint,
        }
    }
}

/// `--output` values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented dump followed by the verdict.
    #[default]
    Text,
    /// One JSON document.
    Json,
}

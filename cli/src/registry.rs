//! # Registry Subcommand
//!
//! Lists the operator type keys each wire format decodes out of the box.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use proofscope::WireFormat;

use crate::WireFormatArg;

/// Arguments for `proofscope registry`.
#[derive(Args, Debug, Clone, Default)]
pub struct RegistryArgs {
    /// Only list this format.
    #[arg(long, value_enum)]
    pub wire_format: Option<WireFormatArg>,
}

/// Execute `proofscope registry`.
pub fn run_registry<W: Write>(args: &RegistryArgs, out: &mut W) -> Result<u8> {
    let formats = match args.wire_format {
        Some(format) => vec![WireFormat::from(format)],
        None => WireFormat::ALL.to_vec(),
    };
    for format in formats {
        writeln!(out, "{format}:")?;
        for type_key in format.default_registry().type_keys() {
            writeln!(out, "    {type_key}")?;
        }
    }
    Ok(crate::EXIT_NORMAL)
}

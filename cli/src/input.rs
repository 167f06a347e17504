//! # Input
//!
//! Proof and call data arrive as a hex argument or a file. Files hold hex
//! text unless `--binary` is given; `-` reads standard input.

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::Args;

/// Where the input bytes come from.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Input bytes as hex, with or without a `0x` prefix.
    #[arg(value_name = "HEX", conflicts_with = "file")]
    pub hex: Option<String>,

    /// Read the input from a file, `-` for standard input.
    #[arg(long, short, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// The file holds raw bytes rather than hex text.
    #[arg(long, requires = "file")]
    pub binary: bool,
}

impl InputArgs {
    /// Resolve the input to bytes.
    pub fn read(&self) -> Result<Vec<u8>> {
        match (&self.hex, &self.file) {
            (Some(text), _) => decode_hex(text),
            (None, Some(path)) => {
                let raw = if path.as_os_str() == "-" {
                    let mut raw = Vec::new();
                    io::stdin()
                        .read_to_end(&mut raw)
                        .context("failed to read standard input")?;
                    raw
                } else {
                    fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
                };
                if self.binary {
                    Ok(raw)
                } else {
                    let text = String::from_utf8(raw).context("input file is not hex text")?;
                    decode_hex(&text)
                }
            }
            (None, None) => bail!("no input: pass HEX or --file"),
        }
    }
}

/// Decode hex text, ignoring surrounding whitespace and a `0x` prefix.
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    hex::decode(digits).context("input is not valid hex")
}

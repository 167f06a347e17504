//! # proofscope CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::{io, process::ExitCode};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use proofscope_cli::analyze::{run_fixture, run_proof, run_tx, FixtureArgs, ProofArgs, TxArgs};
use proofscope_cli::registry::{run_registry, RegistryArgs};

/// Decode Merkle proof operators and flag inclusion proofs that prove more
/// than one leaf.
#[derive(Parser, Debug)]
#[command(name = "proofscope", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging. Repeat for more (-v, -vv, -vvv).
    /// `RUST_LOG` takes precedence when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode and judge raw proof bytes.
    Proof(ProofArgs),

    /// Judge the proof argument of handlePackage call data.
    Tx(TxArgs),

    /// Judge the bundled BSC exploit proof.
    Fixture(FixtureArgs),

    /// List the operator decoders of each wire format.
    Registry(RegistryArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let mut stdout = io::stdout().lock();
    let result = match cli.command {
        Commands::Proof(args) => run_proof(&args, &mut stdout),
        Commands::Tx(args) => run_tx(&args, &mut stdout),
        Commands::Fixture(args) => run_fixture(&args, &mut stdout),
        Commands::Registry(args) => run_registry(&args, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use voter_allowlist_merkle::{InvalidAddressPolicy, Strategy};

mod commands;
mod config;
mod error;
mod pipeline;

use error::CliResult;

#[derive(Parser)]
#[command(name = "voter-allowlist")]
#[command(about = "Build, match and verify Merkle allowlists for on-chain voter checks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a tree with a known strategy and write its proofs
    Build {
        /// Address list (JSON array, or CSV with an `address` column)
        address_file: PathBuf,

        /// Strategy as <encoding>/<arity>/<order>
        #[arg(short, long, default_value = "abi-encoded-tuple/double/sorted-ascending")]
        strategy: Strategy,

        /// Fail unless the built root equals this root
        #[arg(long)]
        expect_root: Option<String>,

        /// Output directory for merkle_root.txt, proofs.json and manifest.json
        #[arg(short, long, default_value = "proofs")]
        output_dir: PathBuf,

        /// Fail on the first invalid address instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Report the root without writing artifacts
        #[arg(long)]
        dry_run: bool,
    },

    /// Find the strategy (and address list version) behind a published root
    Match {
        /// Address lists to try, newest first
        #[arg(required = true)]
        address_files: Vec<PathBuf>,

        /// Published merkle root (0x + 64 hex)
        #[arg(short, long)]
        target_root: String,

        /// Candidate strategy; repeat to build the search list (default: all eight)
        #[arg(short, long = "candidate")]
        candidates: Vec<Strategy>,

        /// Output directory for merkle_root.txt, proofs.json and manifest.json
        #[arg(short, long, default_value = "proofs")]
        output_dir: PathBuf,

        /// Fail on the first invalid address instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Report the match without writing artifacts
        #[arg(long)]
        dry_run: bool,
    },

    /// Run the pipeline described by a YAML config file
    Run {
        /// Pipeline configuration file
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Print the stored proof for an address
    Proof {
        /// Address to look up, in any casing
        address: String,

        /// Directory holding the artifacts
        #[arg(short, long, default_value = "proofs")]
        dir: PathBuf,
    },

    /// Re-verify stored proofs against the stored root
    Verify {
        /// Verify only this address
        address: Option<String>,

        /// Directory holding the artifacts
        #[arg(short, long, default_value = "proofs")]
        dir: PathBuf,
    },

    /// List the default candidate strategies in search order
    Strategies,
}

fn policy(strict: bool) -> InvalidAddressPolicy {
    if strict {
        InvalidAddressPolicy::Strict
    } else {
        InvalidAddressPolicy::Skip
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            address_file,
            strategy,
            expect_root,
            output_dir,
            strict,
            dry_run,
        } => commands::build::execute(
            address_file,
            strategy,
            expect_root,
            output_dir,
            policy(strict),
            dry_run,
        ),

        Commands::Match {
            address_files,
            target_root,
            candidates,
            output_dir,
            strict,
            dry_run,
        } => commands::match_root::execute(
            address_files,
            target_root,
            candidates,
            output_dir,
            policy(strict),
            dry_run,
        ),

        Commands::Run { config } => commands::run::execute(config),

        Commands::Proof { address, dir } => commands::proof::execute(dir, address),

        Commands::Verify { address, dir } => commands::verify::execute(dir, address),

        Commands::Strategies => commands::strategies::execute(),
    }
}

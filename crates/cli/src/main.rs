use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use codsign_verify::commands::{inspect_command, verify_command};
use codsign_verify::logging::init_tracing;

/// COD signer-policy verification CLI.
///
/// This CLI is a thin wrapper around `codsign-core` (exposed in code as `codsign_core`).
/// All parsing and policy logic lives in the library so it can be tested thoroughly
/// and reused from build-pipeline hooks.
#[derive(Parser, Debug)]
#[command(
    name = "codsign-verify",
    version,
    about = "Verify that COD files carry the required signatures",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit log lines as JSON on stderr.
    #[arg(long, default_value_t = false, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check COD files against the required signer set.
    ///
    /// Exits non-zero if any file (or any sibling inside a big COD) is unsigned,
    /// malformed, or missing a required signer.
    Verify {
        /// Comma-separated signer ids, e.g. `RRT,RBB,RCR`. Overrides `--config`.
        #[arg(long)]
        signers: Option<String>,

        /// JSON or YAML file with a `signers` list.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit a JSON report instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// COD files to check.
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Show the signer ids found in COD files without applying any policy.
    Inspect {
        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// COD files to read.
        #[arg(required = true)]
        files: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    match cli.command {
        Command::Verify { signers, config, json, files } => {
            verify_command(&files, signers.as_deref(), config.as_deref(), json)?
        }
        Command::Inspect { json, files } => inspect_command(&files, json)?,
    }

    Ok(())
}

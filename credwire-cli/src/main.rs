//! credwire command-line tool.
//!
//! Inspects and builds fixed-layout Thread credential blobs.
//!
//! # Usage
//!
//! ```text
//! credwire-cli layout
//! credwire-cli show <FILE>
//! credwire-cli build --pan-id <N> --network-name <NAME> --channel <N> \
//!     [--active-timestamp <N>] [--master-key <HEX32>] [--pskc <HEX32>] \
//!     [--extended-pan-id <HEX16>] [--mesh-prefix <HEX16>] --output <FILE>
//! ```
//!
//! Byte-array fields default to all zeros when omitted.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use credwire_cli::commands::{self, BuildRequest};

/// Inspect and build fixed-layout device credential blobs.
#[derive(Parser, Debug)]
#[command(name = "credwire-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the Thread credential record layout.
    Layout,
    /// Decode a credential blob file and print its fields and a hex dump.
    Show {
        /// Path to the 76-byte credential blob.
        file: PathBuf,
    },
    /// Encode a credential blob and write it to a file.
    Build {
        /// Active operational dataset timestamp.
        #[arg(long, default_value_t = 0)]
        active_timestamp: u64,
        /// Master key as 32 hex digits.
        #[arg(long, default_value = "00000000000000000000000000000000")]
        master_key: String,
        /// PSKc as 32 hex digits.
        #[arg(long, default_value = "00000000000000000000000000000000")]
        pskc: String,
        /// Extended PAN ID as 16 hex digits.
        #[arg(long, default_value = "0000000000000000")]
        extended_pan_id: String,
        /// Mesh-local prefix as 16 hex digits.
        #[arg(long, default_value = "0000000000000000")]
        mesh_prefix: String,
        /// 16-bit PAN identifier.
        #[arg(long)]
        pan_id: u16,
        /// Network name (at most 17 UTF-8 bytes).
        #[arg(long)]
        network_name: String,
        /// Radio channel number.
        #[arg(long)]
        channel: u8,
        /// Output file for the encoded blob.
        #[arg(long, short = 'o')]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Initialize tracing (respects RUST_LOG env var).
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match cli.command {
        Command::Layout => {
            print!("{}", commands::layout());
        }
        Command::Show { file } => {
            let out = commands::show(&file)
                .with_context(|| format!("Failed to show {}", file.display()))?;
            print!("{out}");
        }
        Command::Build {
            active_timestamp,
            master_key,
            pskc,
            extended_pan_id,
            mesh_prefix,
            pan_id,
            network_name,
            channel,
            output,
        } => {
            let request = BuildRequest {
                active_timestamp,
                master_key,
                pskc,
                extended_pan_id,
                mesh_prefix,
                pan_id,
                network_name,
                channel,
            };
            commands::build(&request, &output)
                .with_context(|| format!("Failed to build {}", output.display()))?;
            println!("wrote {}", output.display());
        }
    }

    Ok(())
}

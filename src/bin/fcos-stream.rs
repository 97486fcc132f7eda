//! CLI binary for coreos-stream-metadata crate.

use std::path::Path;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use coreos_stream_metadata::{aws_ami, download_iso, Channel, StreamError, StreamMetadata};
use tracing_subscriber::EnvFilter;

/// Architecture whose artifacts are looked up.
const TARGET_ARCH: &str = "x86_64";

/// AWS region whose AMI is printed.
const REGION: &str = "us-east-2";

/// Release channel whose stream is fetched.
const CHANNEL: Channel = Channel::Stable;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(
    author,
    version,
    about = "Look up Fedora CoreOS stable artifacts for x86_64",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the AMI published in us-east-2
    AwsAmi,

    /// Download the live ISO into the current directory
    DownloadIso,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            tracing::debug!(kind = ?e.kind(), "rejected arguments");
            eprintln!("error: {}", StreamError::Usage(env!("CARGO_BIN_NAME").to_string()));
            return ExitCode::FAILURE;
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

async fn run(cli: Cli) -> Result<(), StreamError> {
    let metadata = StreamMetadata::new(CHANNEL)?;
    let stream = metadata.fetch().await?;

    match cli.command {
        Commands::AwsAmi => {
            println!("{}", aws_ami(&stream, TARGET_ARCH, REGION)?);
        }
        Commands::DownloadIso => {
            download_iso(&stream, TARGET_ARCH, metadata.client(), Path::new(".")).await?;
        }
    }
    Ok(())
}

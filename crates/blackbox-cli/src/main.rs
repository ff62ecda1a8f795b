//! Blackbox CLI binary entrypoint.
//!
//! This is the main entry point for the `blackbox` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use blackbox::{Recorder, RecorderConfig};
use blackbox_cli::cli::{Cli, Commands};
use blackbox_cli::commands::{DownloadCommand, ShowCommand};
use blackbox_cli::output::OutputFormat;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), blackbox_cli::CliError> {
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();

    let config = RecorderConfig::default().with_namespace(cli.namespace.as_str());
    let recorder = Recorder::connect(&cli.store, config).await?;
    debug!(store = %cli.store, namespace = %cli.namespace, "connected to store");

    let result = match cli.command {
        Commands::Show { id } => {
            let cmd = ShowCommand::new(&recorder);
            cmd.execute(&mut stdout, &format, &id).await
        }
        Commands::Download { id, output } => {
            let cmd = DownloadCommand::new(&recorder);
            cmd.execute(&mut stdout, &id, output.as_deref()).await
        }
    };

    // Ignore close errors so they never mask the command result.
    let _ = recorder.close().await;
    result
}

//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Blackbox CLI - retrieve captured request logs.
#[derive(Parser, Debug, Clone)]
#[command(name = "blackbox")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Store URL to read records from.
    #[arg(short, long, env = "BLACKBOX_STORE_URL", default_value = "redis://127.0.0.1:6379")]
    pub store: String,

    /// Key namespace the recorder wrote under.
    #[arg(short, long, env = "BLACKBOX_NAMESPACE", default_value = "blackbox")]
    pub namespace: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[derive(Default)]
pub enum Format {
    /// Raw transcript text.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the captured log for a request.
    Show {
        /// Request ID to look up.
        id: String,
    },

    /// Save the captured log for a request to a file.
    ///
    /// Writes the raw transcript, not the JSON wrapper, regardless of
    /// the output format flag.
    Download {
        /// Request ID to look up.
        id: String,

        /// Destination path. Defaults to `<id>.log` in the current
        /// directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

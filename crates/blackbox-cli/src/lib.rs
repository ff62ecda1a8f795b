//! # blackbox-cli
//!
//! Command-line retrieval for captured request logs.
//!
//! Provides commands for:
//! - Printing a captured request log (`show`)
//! - Saving a captured request log to a file (`download`)
//!
//! # Architecture
//!
//! The CLI connects to the same Redis store the capturing application
//! writes to and retrieves transcripts through [`blackbox::Recorder`],
//! so key layout, compression, and sanitisation stay in one place.
//!
//! ```text
//! ┌──────────────┐      retrieve       ┌───────────────┐
//! │ blackbox-cli │◄───────────────────►│  Redis store  │
//! └──────────────┘    (zlib frames)    └───────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, Format};
pub use error::CliError;
pub use output::OutputFormat;

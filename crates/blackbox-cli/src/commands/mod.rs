//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`show`] - Print a captured request log
//! - [`download`] - Save a captured request log to a file

pub mod download;
pub mod show;

pub use download::DownloadCommand;
pub use show::ShowCommand;

//! Show command implementation.
//!
//! Prints the captured log transcript for a single request.

use std::io::Write;

use blackbox::Recorder;
use serde::Serialize;

use crate::error::CliError;
use crate::output::{OutputFormat, TextDisplay};

/// Handler for the show command.
pub struct ShowCommand<'a> {
    recorder: &'a Recorder,
}

impl<'a> ShowCommand<'a> {
    /// Creates a new show command handler.
    #[must_use]
    pub const fn new(recorder: &'a Recorder) -> Self {
        Self { recorder }
    }

    /// Executes the show command.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::NotFound`] when no transcript exists under the
    /// request ID, and propagates store and decode failures.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        request_id: &str,
    ) -> Result<(), CliError> {
        let log = self
            .recorder
            .retrieve(request_id)
            .await?
            .ok_or_else(|| CliError::NotFound(request_id.to_owned()))?;

        let transcript = Transcript {
            request_id: request_id.to_owned(),
            log,
        };
        format.write(out, &transcript)?;
        Ok(())
    }
}

// Output types

/// A retrieved request log transcript.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    /// Request ID the transcript was recorded under.
    pub request_id: String,
    /// Captured log text.
    pub log: String,
}

impl TextDisplay for Transcript {
    fn write_text<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{}", self.log)?;
        Ok(())
    }
}

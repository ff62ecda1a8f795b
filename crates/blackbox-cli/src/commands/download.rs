//! Download command implementation.
//!
//! Saves a captured request log to a local file.

use std::io::Write;
use std::path::{Path, PathBuf};

use blackbox::Recorder;

use crate::error::CliError;

/// Handler for the download command.
pub struct DownloadCommand<'a> {
    recorder: &'a Recorder,
}

impl<'a> DownloadCommand<'a> {
    /// Creates a new download command handler.
    #[must_use]
    pub const fn new(recorder: &'a Recorder) -> Self {
        Self { recorder }
    }

    /// Executes the download command.
    ///
    /// Writes the transcript to `output`, or to `{id}.log` in the current
    /// directory when no path is given.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::NotFound`] when no transcript exists under the
    /// request ID, and propagates store, decode, and file-write failures.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        request_id: &str,
        output: Option<&Path>,
    ) -> Result<(), CliError> {
        let log = self
            .recorder
            .retrieve(request_id)
            .await?
            .ok_or_else(|| CliError::NotFound(request_id.to_owned()))?;

        let path = target_path(request_id, output);
        tokio::fs::write(&path, &log).await?;
        writeln!(out, "saved request {request_id} to {}", path.display())?;
        Ok(())
    }
}

fn target_path(request_id: &str, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(format!("{request_id}.log")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use blackbox::{Recorder, RequestScope};

    async fn seeded_recorder(request_id: &str, line: &str) -> Arc<Recorder> {
        let recorder = Arc::new(Recorder::in_memory());
        let scope = RequestScope::new(Arc::clone(&recorder));
        scope.write(line);
        scope.flush(request_id).await.expect("flush");
        recorder
    }

    #[test]
    fn default_path_is_id_dot_log() {
        assert_eq!(target_path("abc-123", None), PathBuf::from("abc-123.log"));
        assert_eq!(
            target_path("abc-123", Some(Path::new("/tmp/custom.log"))),
            PathBuf::from("/tmp/custom.log")
        );
    }

    #[tokio::test]
    async fn download_writes_transcript_to_explicit_path() {
        let recorder = seeded_recorder("req-9", "GET /downloads\n").await;
        let cmd = DownloadCommand::new(&recorder);
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("capture.log");

        let mut out = Vec::new();
        cmd.execute(&mut out, "req-9", Some(&path))
            .await
            .expect("execute");

        let contents = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(contents, "GET /downloads");

        let message = String::from_utf8(out).expect("utf8");
        assert!(message.contains("req-9"));
        assert!(message.contains("capture.log"));
    }

    #[tokio::test]
    async fn download_unknown_id_is_not_found() {
        let recorder = Recorder::in_memory();
        let cmd = DownloadCommand::new(&recorder);

        let mut out = Vec::new();
        let err = cmd
            .execute(&mut out, "missing", None)
            .await
            .expect_err("absent record");

        assert!(matches!(err, CliError::NotFound(_)));
        assert!(out.is_empty());
    }
}

//! Per-request log accumulation.
//!
//! A [`RequestScope`] is the buffer for exactly one unit of work. Each
//! concurrent request creates its own scope, so isolation comes from
//! ownership rather than from any shared registry: two requests cannot
//! see or corrupt each other's lines because nothing ever holds both
//! buffers.

use std::mem;

use parking_lot::Mutex;
use tracing::debug;

use crate::codec;
use crate::error::Result;
use crate::recorder::SharedRecorder;
use crate::sanitize::strip_ansi_colors;
use crate::traits::LogSink;

/// What a [`RequestScope::flush`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// A compressed record was written to the store.
    Stored,
    /// The transcript was empty after trimming; nothing was written.
    Empty,
}

/// Ordered log buffer for one unit of work.
///
/// Lines are sanitized on the way in and kept in append order. The
/// buffer lives until [`flush`](Self::flush), which drains it
/// unconditionally; a scope can be reused afterwards and starts a fresh
/// transcript.
pub struct RequestScope {
    recorder: SharedRecorder,
    lines: Mutex<Vec<String>>,
}

impl RequestScope {
    /// Creates an empty scope bound to `recorder`.
    #[must_use]
    pub fn new(recorder: SharedRecorder) -> Self {
        Self {
            recorder,
            lines: Mutex::new(Vec::new()),
        }
    }

    /// Appends one log line, stripping ANSI color codes first.
    ///
    /// Lines are stored otherwise as given: a line that should end with
    /// a newline must carry its own, and joining adds no separator.
    pub fn write(&self, line: &str) {
        self.lines.lock().push(strip_ansi_colors(line));
    }

    /// The transcript as it would be stored right now: all buffered
    /// lines concatenated, trimmed of surrounding whitespace.
    #[must_use]
    pub fn combined(&self) -> String {
        self.lines.lock().concat().trim().to_owned()
    }

    /// Number of buffered lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// Returns true if nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Compresses the buffered transcript and stores it under
    /// `request_id` with the recorder's TTL, then reports what happened.
    ///
    /// The buffer is drained before any fallible work, so it is empty
    /// afterwards on every path: a compression or store failure
    /// propagates to the caller but never re-populates the buffer, and
    /// the next [`write`](Self::write) starts a fresh transcript. A
    /// whitespace-only transcript stores nothing and reports
    /// [`FlushOutcome::Empty`].
    ///
    /// # Errors
    ///
    /// Propagates compression and store failures.
    pub async fn flush(&self, request_id: &str) -> Result<FlushOutcome> {
        let lines = mem::take(&mut *self.lines.lock());
        let joined = lines.concat();
        let transcript = joined.trim();
        if transcript.is_empty() {
            return Ok(FlushOutcome::Empty);
        }

        let compressed = codec::compress(transcript)?;
        let key = self.recorder.request_key(request_id);
        self.recorder
            .store()
            .set(&key, &compressed, self.recorder.config().ttl)
            .await?;
        debug!(
            request_id,
            lines = lines.len(),
            bytes = compressed.len(),
            "flushed request log"
        );
        Ok(FlushOutcome::Stored)
    }
}

impl LogSink for RequestScope {
    fn write_line(&self, line: &str) {
        self.write(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecorderError;
    use crate::recorder::{shared_recorder, Recorder};
    use crate::traits::TtlStore;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Arc;
    use std::time::Duration;

    /// Store that refuses every operation, for failure-path tests.
    struct FailingStore;

    impl TtlStore for FailingStore {
        fn set<'a>(
            &'a self,
            _key: &'a str,
            _value: &'a [u8],
            _ttl: Duration,
        ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
            Box::pin(async {
                Err(RecorderError::StoreUnavailable("injected".to_owned()))
            })
        }

        fn get<'a>(
            &'a self,
            _key: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Option<Vec<u8>>>> + Send + 'a>> {
            Box::pin(async {
                Err(RecorderError::StoreUnavailable("injected".to_owned()))
            })
        }

        fn close(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
            Box::pin(async { Ok(()) })
        }
    }

    #[test]
    fn write_sanitizes_at_write_time() {
        let scope = RequestScope::new(shared_recorder());
        scope.write("\x1b[31mboom\x1b[0m\n");
        assert_eq!(scope.combined(), "boom");
    }

    #[test]
    fn combined_joins_without_separator_and_trims() {
        let scope = RequestScope::new(shared_recorder());
        scope.write("first line\n");
        scope.write("second line\n");
        scope.write("tail without newline");
        assert_eq!(
            scope.combined(),
            "first line\nsecond line\ntail without newline"
        );
        assert_eq!(scope.len(), 3);
    }

    #[test]
    fn combined_on_empty_scope_is_empty() {
        let scope = RequestScope::new(shared_recorder());
        assert!(scope.is_empty());
        assert_eq!(scope.combined(), "");
    }

    #[tokio::test]
    async fn flush_stores_and_clears() {
        let recorder = shared_recorder();
        let scope = RequestScope::new(Arc::clone(&recorder));
        scope.write("hello\n");
        scope.write("world\n");

        let outcome = scope.flush("req-1").await.expect("flush");
        assert_eq!(outcome, FlushOutcome::Stored);
        assert!(scope.is_empty());

        let transcript = recorder.retrieve("req-1").await.expect("retrieve");
        assert_eq!(transcript.as_deref(), Some("hello\nworld"));
    }

    #[tokio::test]
    async fn empty_flush_stores_nothing() {
        let recorder = shared_recorder();
        let scope = RequestScope::new(Arc::clone(&recorder));

        let outcome = scope.flush("req-empty").await.expect("flush");
        assert_eq!(outcome, FlushOutcome::Empty);
        assert!(recorder.retrieve("req-empty").await.expect("retrieve").is_none());
    }

    #[tokio::test]
    async fn whitespace_only_flush_stores_nothing() {
        let recorder = shared_recorder();
        let scope = RequestScope::new(Arc::clone(&recorder));
        scope.write("   \n");
        scope.write("\t\n");
        scope.write("\x1b[0m\n");

        let outcome = scope.flush("req-blank").await.expect("flush");
        assert_eq!(outcome, FlushOutcome::Empty);
        assert!(scope.is_empty());
        assert!(recorder.retrieve("req-blank").await.expect("retrieve").is_none());
    }

    #[tokio::test]
    async fn flush_clears_buffer_even_when_store_fails() {
        let recorder = Arc::new(Recorder::new(Arc::new(FailingStore)));
        let scope = RequestScope::new(Arc::clone(&recorder));
        scope.write("doomed line\n");

        let err = scope.flush("req-2").await.expect_err("store down");
        assert!(matches!(err, RecorderError::StoreUnavailable(_)));
        assert!(scope.is_empty(), "buffer must drain on the failure path");

        // The next write starts a fresh transcript with no leftovers.
        scope.write("fresh line\n");
        assert_eq!(scope.combined(), "fresh line");
    }

    #[tokio::test]
    async fn scope_can_be_reused_after_flush() {
        let recorder = shared_recorder();
        let scope = RequestScope::new(Arc::clone(&recorder));

        scope.write("first request\n");
        scope.flush("req-a").await.expect("flush a");

        scope.write("second request\n");
        scope.flush("req-b").await.expect("flush b");

        let first = recorder.retrieve("req-a").await.expect("retrieve a");
        let second = recorder.retrieve("req-b").await.expect("retrieve b");
        assert_eq!(first.as_deref(), Some("first request"));
        assert_eq!(second.as_deref(), Some("second request"));
    }

    #[tokio::test]
    async fn scopes_on_one_recorder_stay_separate() {
        let recorder = shared_recorder();
        let scope_a = RequestScope::new(Arc::clone(&recorder));
        let scope_b = RequestScope::new(Arc::clone(&recorder));

        scope_a.write("line for a\n");
        scope_b.write("line for b\n");
        assert_eq!(scope_a.combined(), "line for a");
        assert_eq!(scope_b.combined(), "line for b");

        scope_a.flush("req-a").await.expect("flush a");
        scope_b.flush("req-b").await.expect("flush b");

        let a = recorder.retrieve("req-a").await.expect("retrieve").expect("present");
        let b = recorder.retrieve("req-b").await.expect("retrieve").expect("present");
        assert!(!a.contains("line for b"));
        assert!(!b.contains("line for a"));
    }

    #[tokio::test]
    async fn flush_overwrites_prior_record_for_same_id() {
        let recorder = shared_recorder();

        let scope = RequestScope::new(Arc::clone(&recorder));
        scope.write("first attempt\n");
        scope.flush("req-retry").await.expect("flush");

        scope.write("second attempt\n");
        scope.flush("req-retry").await.expect("flush");

        let transcript = recorder.retrieve("req-retry").await.expect("retrieve");
        assert_eq!(transcript.as_deref(), Some("second attempt"));
    }

    #[test]
    fn scope_is_a_log_sink() {
        let scope = RequestScope::new(shared_recorder());
        let sink: &dyn LogSink = &scope;
        sink.write_line("via the sink interface\n");
        sink.close();
        assert_eq!(scope.combined(), "via the sink interface");
    }
}

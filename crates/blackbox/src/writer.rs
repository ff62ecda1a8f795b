//! Feeding the tracing stack into a request scope.
//!
//! [`ScopeWriter`] is the glue between a formatted logging layer and a
//! [`RequestScope`]: hand it to `tracing_subscriber::fmt().with_writer(..)`
//! and every formatted event line the subscriber emits for this request
//! lands in the scope, ready to be flushed under the request's ID.

use std::io;
use std::mem;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing_subscriber::fmt::MakeWriter;

use crate::scope::RequestScope;

/// An [`io::Write`] adapter that pushes complete lines into a
/// [`RequestScope`].
///
/// Bytes buffer until a newline; each complete line is handed to the
/// scope with its newline intact, so the stored transcript reads exactly
/// like the terminal output would have. A partial trailing line is
/// pushed by [`flush`](io::Write::flush). Clones share the pending
/// buffer, which lets a formatter call
/// [`make_writer`](MakeWriter::make_writer) once per event.
#[derive(Clone)]
pub struct ScopeWriter {
    scope: Arc<RequestScope>,
    pending: Arc<Mutex<Vec<u8>>>,
}

impl ScopeWriter {
    /// Creates a writer feeding `scope`.
    #[must_use]
    pub fn new(scope: Arc<RequestScope>) -> Self {
        Self {
            scope,
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The scope this writer feeds.
    #[must_use]
    pub fn scope(&self) -> &Arc<RequestScope> {
        &self.scope
    }

    fn push_complete_lines(&self) {
        let mut pending = self.pending.lock();
        while let Some(pos) = pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = pending.drain(..=pos).collect();
            self.scope.write(&String::from_utf8_lossy(&line));
        }
    }
}

impl io::Write for ScopeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.lock().extend_from_slice(buf);
        self.push_complete_lines();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Push any partial trailing line so nothing is lost at shutdown.
        let tail = mem::take(&mut *self.pending.lock());
        if !tail.is_empty() {
            self.scope.write(&String::from_utf8_lossy(&tail));
        }
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for ScopeWriter {
    type Writer = ScopeWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

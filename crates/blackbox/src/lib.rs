//! # blackbox
//!
//! Per-request log capture and retrieval.
//!
//! Every log line a request produces is buffered in that request's own
//! scope, and at the end of the request the whole transcript is
//! compressed and written to a TTL key-value store under the request's
//! ID. Pull the transcript back up later, by ID, to see exactly what one
//! request logged.
//!
//! This crate provides:
//!
//! - [`Recorder`] — store handle and retrieval, shared process-wide
//! - [`RequestScope`] — per-request log buffer, isolated by ownership
//! - [`ScopeWriter`] — feeds `tracing` output into a scope
//! - [`TtlStore`] — abstract trait over TTL key-value backends
//! - [`MemoryStore`] — in-memory backend for tests and development
//! - [`RedisStore`] — Redis backend for production
//! - [`LogSink`] — the capability a logging facility writes lines into
//!
//! ## Example
//!
//! ```rust
//! use blackbox::{shared_recorder, FlushOutcome, RequestScope};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> blackbox::Result<()> {
//! let recorder = shared_recorder();
//!
//! // One scope per request.
//! let scope = RequestScope::new(recorder.clone());
//! scope.write("GET /orders/17\n");
//! scope.write("\x1b[32m200 OK\x1b[0m in 12ms\n");
//! assert_eq!(scope.flush("req-17").await?, FlushOutcome::Stored);
//!
//! // Later, by request ID.
//! let transcript = recorder.retrieve("req-17").await?;
//! assert_eq!(transcript.as_deref(), Some("GET /orders/17\n200 OK in 12ms"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod error;
pub mod recorder;
pub mod redis_store;
pub mod sanitize;
pub mod scope;
pub mod store;
pub mod traits;
pub mod writer;

// Re-export main types
pub use error::{RecorderError, Result};
pub use recorder::{shared_recorder, Recorder, RecorderConfig, SharedRecorder};
pub use redis_store::RedisStore;
pub use sanitize::strip_ansi_colors;
pub use scope::{FlushOutcome, RequestScope};
pub use store::MemoryStore;
pub use traits::{LogSink, TtlStore};
pub use writer::ScopeWriter;

//! Traits for store backends and log sinks.
//!
//! [`TtlStore`] abstracts over TTL key-value backends so the recorder
//! works against in-memory and Redis storage interchangeably. [`LogSink`]
//! is the capability a logging facility needs from anything it feeds
//! lines into.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::error::Result;

/// Trait for TTL key-value store backends.
///
/// Implementations must be safe for concurrent use from many units of
/// work sharing one client; the recorder adds no locking of its own
/// around store calls.
pub trait TtlStore: Send + Sync {
    /// Writes `value` under `key`, replacing any prior value, and
    /// schedules removal no earlier than `ttl` after the write. Exact
    /// eviction timing is the store's own business.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn set<'a>(
        &'a self,
        key: &'a str,
        value: &'a [u8],
        ttl: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

    /// Reads the current value under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist or has expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Vec<u8>>>> + Send + 'a>>;

    /// Releases the client's connection. Closing twice is a no-op;
    /// operations after close fail with a store-unavailable error.
    ///
    /// # Errors
    ///
    /// Returns an error if releasing the connection fails.
    fn close(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Capability a logging facility needs from a per-request sink.
///
/// One method per emitted line plus an idempotent close. Implemented by
/// [`RequestScope`](crate::scope::RequestScope).
pub trait LogSink: Send + Sync {
    /// Accepts one log line. A line that should end with a newline must
    /// carry its own; the sink adds nothing.
    fn write_line(&self, line: &str);

    /// Releases anything the sink holds. Default is a no-op.
    fn close(&self) {}
}

//! Redis-backed TTL store.
//!
//! The production backend: `SETEX`-style writes and plain `GET`s against
//! a Redis instance shared by every worker process, which is what makes
//! a transcript written by one worker retrievable from any other.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use parking_lot::RwLock;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::debug;

use crate::error::{RecorderError, Result};
use crate::traits::TtlStore;

/// TTL store client backed by Redis.
///
/// Holds a [`ConnectionManager`], which multiplexes one connection,
/// reconnects on failure, and is cloned per call; a single `RedisStore`
/// can therefore be shared across concurrent units of work without any
/// locking around store calls.
pub struct RedisStore {
    manager: RwLock<Option<ConnectionManager>>,
}

impl RedisStore {
    /// Connects to Redis at `url`, for example `redis://127.0.0.1:6379`.
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::StoreUnavailable`] if the URL does not
    /// parse or the initial connection fails.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| RecorderError::StoreUnavailable(e.to_string()))?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| RecorderError::StoreUnavailable(e.to_string()))?;
        debug!(url, "connected to redis store");
        Ok(Self {
            manager: RwLock::new(Some(manager)),
        })
    }

    fn connection(&self) -> Result<ConnectionManager> {
        self.manager
            .read()
            .clone()
            .ok_or_else(|| RecorderError::StoreUnavailable("store client is closed".to_owned()))
    }
}

/// Whole seconds for `SETEX`: fractional TTLs round up so eviction never
/// lands before the configured TTL, and zero floors at one second because
/// Redis rejects a zero expiry.
fn ttl_seconds(ttl: Duration) -> u64 {
    (ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0)).max(1)
}

impl TtlStore for RedisStore {
    fn set<'a>(
        &'a self,
        key: &'a str,
        value: &'a [u8],
        ttl: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let mut conn = self.connection()?;
            let seconds = ttl_seconds(ttl);
            conn.set_ex::<_, _, ()>(key, value, seconds)
                .await
                .map_err(|e| RecorderError::StoreUnavailable(e.to_string()))
        })
    }

    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Vec<u8>>>> + Send + 'a>> {
        Box::pin(async move {
            let mut conn = self.connection()?;
            conn.get::<_, Option<Vec<u8>>>(key)
                .await
                .map_err(|e| RecorderError::StoreUnavailable(e.to_string()))
        })
    }

    fn close(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            // Dropping the last manager clone tears the connection down.
            self.manager.write().take();
            Ok(())
        })
    }
}

//! Recorder construction, retrieval, and lifecycle.
//!
//! One [`Recorder`] per process, built at startup and handed out as a
//! [`SharedRecorder`]; per-request state never lives here, only in
//! [`RequestScope`](crate::scope::RequestScope) values.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::codec;
use crate::error::Result;
use crate::redis_store::RedisStore;
use crate::store::MemoryStore;
use crate::traits::TtlStore;

/// Configuration for a [`Recorder`].
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Namespace prefix for store keys.
    pub namespace: String,
    /// How long stored records live before the store may evict them.
    pub ttl: Duration,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            namespace: "blackbox".to_owned(),
            ttl: Duration::from_secs(5 * 60),
        }
    }
}

impl RecorderConfig {
    /// Sets the key namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the record TTL.
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Captures per-request log transcripts and retrieves them later.
///
/// The recorder owns the store client and the configuration; requests
/// buffer their lines in [`RequestScope`](crate::scope::RequestScope)
/// values bound to a shared recorder handle.
pub struct Recorder {
    store: Arc<dyn TtlStore>,
    config: RecorderConfig,
}

impl Recorder {
    /// Creates a recorder over any store backend with default config.
    #[must_use]
    pub fn new(store: Arc<dyn TtlStore>) -> Self {
        Self::with_config(store, RecorderConfig::default())
    }

    /// Creates a recorder over any store backend with full configuration.
    #[must_use]
    pub fn with_config(store: Arc<dyn TtlStore>, config: RecorderConfig) -> Self {
        Self { store, config }
    }

    /// Creates a recorder over a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Connects a recorder to Redis at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::StoreUnavailable`](crate::RecorderError::StoreUnavailable)
    /// if the connection cannot be established.
    pub async fn connect(url: &str, config: RecorderConfig) -> Result<Self> {
        let store = RedisStore::connect(url).await?;
        Ok(Self::with_config(Arc::new(store), config))
    }

    /// Retrieves the transcript recorded under `request_id`.
    ///
    /// Returns `Ok(None)` when no record exists, either because nothing
    /// was flushed under that ID or because the TTL ran out. Absence is
    /// a normal outcome, not an error.
    ///
    /// # Errors
    ///
    /// Propagates store failures and decompression failures; neither is
    /// retried here.
    pub async fn retrieve(&self, request_id: &str) -> Result<Option<String>> {
        let key = self.request_key(request_id);
        match self.store.get(&key).await? {
            Some(bytes) => {
                let text = codec::decompress(&bytes)?;
                debug!(request_id, bytes = bytes.len(), "retrieved request log");
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    /// Releases the store connection. Safe to call more than once.
    ///
    /// # Errors
    ///
    /// Propagates a store failure while closing.
    pub async fn close(&self) -> Result<()> {
        self.store.close().await
    }

    /// The store key a transcript for `request_id` lives under.
    #[must_use]
    pub fn request_key(&self, request_id: &str) -> String {
        format!("{}/requests/{}", self.config.namespace, request_id)
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &RecorderConfig {
        &self.config
    }

    pub(crate) fn store(&self) -> &Arc<dyn TtlStore> {
        &self.store
    }
}

/// Shared handle to a [`Recorder`].
pub type SharedRecorder = Arc<Recorder>;

/// Creates a shared recorder over a fresh in-memory store.
#[must_use]
pub fn shared_recorder() -> SharedRecorder {
    Arc::new(Recorder::in_memory())
}

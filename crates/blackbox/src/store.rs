//! In-memory TTL store.
//!
//! Backs the recorder in tests and single-process development setups
//! where standing up Redis is not worth it. Expiry is lazy: reads treat
//! a past-deadline entry as absent, and writes prune dead entries.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::error::{RecorderError, Result};
use crate::traits::TtlStore;

#[derive(Debug, Clone)]
struct StoredValue {
    bytes: Vec<u8>,
    expires_at: Instant,
}

/// Thread-safe in-memory key-value store with per-entry expiry.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredValue>>,
    /// Whether the store is accepting operations.
    open: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            open: AtomicBool::new(true),
        }
    }

    /// Returns the number of live (unexpired) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .values()
            .filter(|v| v.expires_at > now)
            .count()
    }

    /// Returns true if the store holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_open(&self) -> Result<()> {
        if self.open.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(RecorderError::StoreUnavailable(
                "store is closed".to_owned(),
            ))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TtlStore for MemoryStore {
    fn set<'a>(
        &'a self,
        key: &'a str,
        value: &'a [u8],
        ttl: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.check_open()?;
            let now = Instant::now();
            let mut entries = self.entries.write();
            entries.retain(|_, v| v.expires_at > now);
            entries.insert(
                key.to_owned(),
                StoredValue {
                    bytes: value.to_vec(),
                    expires_at: now + ttl,
                },
            );
            Ok(())
        })
    }

    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Vec<u8>>>> + Send + 'a>> {
        Box::pin(async move {
            self.check_open()?;
            let entries = self.entries.read();
            Ok(entries
                .get(key)
                .filter(|v| v.expires_at > Instant::now())
                .map(|v| v.bytes.clone()))
        })
    }

    fn close(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            self.open.store(false, Ordering::Release);
            self.entries.write().clear();
            Ok(())
        })
    }
}

//! Moka in-process backend
//!
//! Concurrent in-memory store built on Moka, honouring the TTL passed to
//! each `put` individually.
//!
//! ## Example
//!
//! ```ignore
//! use memo_providers::cache::MokaBackend;
//!
//! let backend = MokaBackend::with_capacity(1_000);
//! ```

use super::ensure_ttl;
use crate::constants::MOKA_DEFAULT_MAX_ENTRIES;
use async_trait::async_trait;
use memo_domain::error::Result;
use memo_domain::ports::{BackendStatus, KeyValueBackend};
use moka::Expiry;
use moka::future::Cache;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone)]
struct StoredEntry {
    bytes: Arc<[u8]>,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with
struct PerEntryTtl;

impl Expiry<String, StoredEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    // Overwrites restart the clock with the new entry's TTL.
    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Moka-based in-process backend
///
/// Always reachable; `ping` reports `Connected`.
#[derive(Clone)]
pub struct MokaBackend {
    cache: Cache<String, StoredEntry>,
    max_entries: u64,
}

impl Default for MokaBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaBackend {
    /// Create a new Moka backend with default capacity
    pub fn new() -> Self {
        Self::with_capacity(MOKA_DEFAULT_MAX_ENTRIES)
    }

    /// Create a new Moka backend holding at most `max_entries` entries
    pub fn with_capacity(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(PerEntryTtl)
            .build();

        Self { cache, max_entries }
    }

    /// Get the maximum number of entries
    pub fn max_entries(&self) -> u64 {
        self.max_entries
    }

    /// Number of live entries after pending maintenance has run
    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

#[async_trait]
impl KeyValueBackend for MokaBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.cache.get(key).await.map(|entry| entry.bytes.to_vec()))
    }

    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        ensure_ttl(ttl)?;
        let entry = StoredEntry {
            bytes: Arc::from(value),
            ttl,
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn ping(&self) -> BackendStatus {
        BackendStatus::Connected
    }

    async fn shutdown(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaBackend")
            .field("max_entries", &self.max_entries)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

//! In-process backend with switchable outages

use async_trait::async_trait;
use memo_domain::error::{Error, Result};
use memo_domain::{BackendStatus, KeyValueBackend};
use memo_providers::cache::MokaBackend;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Moka-backed store that can be taken offline or made to fail reads/writes
///
/// Every `get`/`put` reaching the backend is counted, failed or not.
#[derive(Debug, Default)]
pub struct FlakyBackend {
    inner: MokaBackend,
    offline: AtomicBool,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    report_disconnected: AtomicBool,
    gets: AtomicUsize,
    puts: AtomicUsize,
}

impl FlakyBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the store offline (every call fails, ping reports disconnected)
    pub fn set_online(&self, online: bool) {
        self.offline.store(!online, Ordering::SeqCst);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make `ping` report disconnected while reads and writes keep working
    pub fn set_report_disconnected(&self, disconnected: bool) {
        self.report_disconnected.store(disconnected, Ordering::SeqCst);
    }

    pub fn get_calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn put_calls(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Write straight into the store, bypassing failure switches and counters
    pub async fn inject(&self, key: &str, value: &[u8]) {
        self.inner
            .put(key, value.to_vec(), Duration::from_secs(300))
            .await
            .expect("in-process put");
    }

    /// Read straight from the store, bypassing failure switches and counters
    pub async fn peek(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.get(key).await.expect("in-process get")
    }

    fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueBackend for FlakyBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.is_offline() || self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::backend_unavailable("flaky backend: read refused"));
        }
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.is_offline() || self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::backend_unavailable("flaky backend: write refused"));
        }
        self.inner.put(key, value, ttl).await
    }

    async fn ping(&self) -> BackendStatus {
        if self.is_offline() || self.report_disconnected.load(Ordering::SeqCst) {
            BackendStatus::Disconnected
        } else {
            BackendStatus::Connected
        }
    }

    fn provider_name(&self) -> &str {
        "flaky"
    }
}

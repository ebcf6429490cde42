//! Null backend
//!
//! A backend that doesn't store anything. Used when caching is disabled:
//! every memoized call recomputes.

use super::ensure_ttl;
use async_trait::async_trait;
use memo_domain::error::Result;
use memo_domain::ports::{BackendStatus, KeyValueBackend};
use std::time::Duration;

/// Backend that never stores anything
///
/// `get` always misses, `put` accepts and discards, `ping` reports
/// `Disconnected` since no store sits behind it.
///
/// # Example
///
/// ```rust
/// use memo_providers::cache::NullBackend;
///
/// let backend = NullBackend::new();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl NullBackend {
    /// Create a new null backend
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KeyValueBackend for NullBackend {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn put(&self, _key: &str, _value: Vec<u8>, ttl: Duration) -> Result<()> {
        ensure_ttl(ttl)
    }

    async fn ping(&self) -> BackendStatus {
        BackendStatus::Disconnected
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

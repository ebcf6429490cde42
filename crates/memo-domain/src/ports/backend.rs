//! Key-Value Backend Port
//!
//! Port for the networked key-value store consulted by the memoizing
//! wrapper. Supports networked (Redis), in-process (Moka) and disabled
//! (Null) implementations.
//!
//! ## Contract
//!
//! | Operation | Missing key | Store unreachable |
//! |-----------|-------------|-------------------|
//! | [`get`](KeyValueBackend::get) | `Ok(None)` | `Err(BackendUnavailable)` |
//! | [`put`](KeyValueBackend::put) | overwrites | `Err(BackendUnavailable)` |
//! | [`ping`](KeyValueBackend::ping) | n/a | `Disconnected`, never an error |
//!
//! Implementations must be safe for concurrent use through a shared
//! `Arc<dyn KeyValueBackend>` and must bound every call by a timeout.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Reachability reported by [`KeyValueBackend::ping`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendStatus {
    /// The store answered the liveness probe
    Connected,
    /// The store could not be reached in time
    Disconnected,
}

impl BackendStatus {
    /// Check if the store answered
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Lowercase wire name (`connected` / `disconnected`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for BackendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-Value Backend Port
///
/// Defines the contract for the store behind the cache-aside layer.
/// Values are opaque bytes; expiry is owned by the store.
///
/// # Example
///
/// ```ignore
/// use memo_domain::ports::KeyValueBackend;
/// use std::time::Duration;
///
/// backend.put("sq:abc", b"16".to_vec(), Duration::from_secs(300)).await?;
/// assert_eq!(backend.get("sq:abc").await?, Some(b"16".to_vec()));
/// ```
#[async_trait]
pub trait KeyValueBackend: Send + Sync + fmt::Debug {
    /// Get the value stored under `key`
    ///
    /// # Returns
    /// The stored bytes if present and unexpired, `None` otherwise
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any existing entry
    ///
    /// The entry must not be evicted earlier than `ttl` after insertion.
    /// A zero `ttl` is rejected with `InvalidArgument`.
    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;

    /// Liveness probe
    ///
    /// Never fails and never reads or writes application keys.
    async fn ping(&self) -> BackendStatus;

    /// Release connection resources at process shutdown
    async fn shutdown(&self) {}

    /// Get the name/identifier of this backend implementation
    ///
    /// # Returns
    /// A string identifier (e.g., "redis", "moka", "null")
    fn provider_name(&self) -> &str;
}

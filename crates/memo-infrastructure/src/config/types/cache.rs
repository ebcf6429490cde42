//! Cache configuration types

use crate::constants::DEFAULT_CACHE_NAMESPACE;
use memo_domain::constants::DEFAULT_CACHE_TTL_SECS;
use memo_providers::constants::{
    MOKA_DEFAULT_MAX_ENTRIES, REDIS_DEFAULT_URL, REDIS_OPERATION_TIMEOUT_MS,
    REDIS_PING_TIMEOUT_MS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Key-value backend implementations
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Networked store shared by every process (default)
    #[default]
    Redis,
    /// In-process store
    Moka,
    /// Caching disabled
    Null,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache enabled; when false the null backend is used
    pub enabled: bool,

    /// Backend implementation
    pub provider: BackendKind,

    /// Connection descriptor for the Redis backend
    pub redis_url: String,

    /// Default TTL in seconds for memoized results
    pub default_ttl_secs: u64,

    /// Upper bound for a single GET/PUT in milliseconds
    pub operation_timeout_ms: u64,

    /// Upper bound for a liveness probe in milliseconds
    pub ping_timeout_ms: u64,

    /// Maximum number of entries for the Moka backend
    pub moka_max_entries: u64,

    /// Default namespace for memoized computations
    pub namespace: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: BackendKind::Redis,
            redis_url: REDIS_DEFAULT_URL.to_string(),
            default_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            operation_timeout_ms: REDIS_OPERATION_TIMEOUT_MS,
            ping_timeout_ms: REDIS_PING_TIMEOUT_MS,
            moka_max_entries: MOKA_DEFAULT_MAX_ENTRIES,
            namespace: DEFAULT_CACHE_NAMESPACE.to_string(),
        }
    }
}

impl CacheConfig {
    /// Default TTL as a duration
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Operation timeout as a duration
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    /// Ping timeout as a duration
    pub fn ping_timeout(&self) -> Duration {
        Duration::from_millis(self.ping_timeout_ms)
    }

    /// Backend actually used, accounting for `enabled`
    pub fn effective_provider(&self) -> BackendKind {
        if self.enabled {
            self.provider
        } else {
            BackendKind::Null
        }
    }
}

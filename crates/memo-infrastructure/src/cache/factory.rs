//! Backend factory
//!
//! Builds the shared [`KeyValueBackend`] handle selected by [`CacheConfig`].

use crate::config::{BackendKind, CacheConfig};
use memo_domain::KeyValueBackend;
use memo_domain::error::Result;
use memo_providers::cache::{MokaBackend, NullBackend, RedisBackend};
use std::sync::Arc;
use tracing::info;

/// Factory for key-value backends
pub struct BackendFactory;

impl BackendFactory {
    /// Backend that never stores anything
    pub fn create_null() -> Arc<dyn KeyValueBackend> {
        Arc::new(NullBackend::new())
    }

    /// In-process backend bounded to `max_entries`
    pub fn create_moka(max_entries: u64) -> Arc<dyn KeyValueBackend> {
        Arc::new(MokaBackend::with_capacity(max_entries))
    }

    /// Redis backend using the configured URL and timeouts
    ///
    /// Only the URL is validated here; the connection is opened on first use.
    pub fn create_redis(config: &CacheConfig) -> Result<Arc<dyn KeyValueBackend>> {
        let backend = RedisBackend::new(&config.redis_url)?
            .with_operation_timeout(config.operation_timeout())
            .with_ping_timeout(config.ping_timeout());
        Ok(Arc::new(backend))
    }

    /// Backend selected by the configuration
    pub fn create_from_config(config: &CacheConfig) -> Result<Arc<dyn KeyValueBackend>> {
        let backend = match config.effective_provider() {
            BackendKind::Redis => Self::create_redis(config)?,
            BackendKind::Moka => Self::create_moka(config.moka_max_entries),
            BackendKind::Null => Self::create_null(),
        };

        info!(
            backend = backend.provider_name(),
            enabled = config.enabled,
            "Cache backend created"
        );
        Ok(backend)
    }
}

/// Create the backend selected by the configuration
pub fn create_backend(config: &CacheConfig) -> Result<Arc<dyn KeyValueBackend>> {
    BackendFactory::create_from_config(config)
}

//! Key-Value Backend Implementations
//!
//! ## Available Backends
//!
//! | Backend | Type | Description |
//! |---------|------|-------------|
//! | [`NullBackend`] | Disabled | Never stores anything |
//! | [`MokaBackend`] | In-process | Moka cache with per-entry TTL |
//! | [`RedisBackend`] | Networked | Redis shared by every process |
//!
//! ## Backend Selection Guide
//!
//! - **Caching disabled**: `NullBackend`
//! - **Single process / tests**: `MokaBackend`
//! - **Multiple processes sharing results**: `RedisBackend`

#[cfg(feature = "backend-moka")]
pub mod moka;
pub mod null;
#[cfg(feature = "backend-redis")]
pub mod redis;

#[cfg(feature = "backend-moka")]
pub use moka::MokaBackend;
pub use null::NullBackend;
#[cfg(feature = "backend-redis")]
pub use redis::RedisBackend;

use memo_domain::error::{Error, Result};
use std::time::Duration;

/// Reject TTLs the store could not honour
pub(crate) fn ensure_ttl(ttl: Duration) -> Result<()> {
    if ttl.is_zero() {
        return Err(Error::invalid_argument("Cache entry TTL must be greater than zero"));
    }
    Ok(())
}

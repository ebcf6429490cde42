//! Backend health checks
//!
//! Reports whether the shared key-value backend is reachable. The probe is
//! informational: memoized calls keep working (recomputing) while the
//! backend is down.

use crate::constants::HEALTH_COMPONENT_CACHE;
use crate::logging::log_health_check;
use memo_domain::{BackendStatus, KeyValueBackend};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Cache health report, serialized as `{"status":"connected"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheHealth {
    /// Result of the liveness probe
    pub status: BackendStatus,
}

impl CacheHealth {
    /// Report for a probe result
    pub fn new(status: BackendStatus) -> Self {
        Self { status }
    }

    /// Whether the backend answered the probe
    pub fn is_healthy(&self) -> bool {
        self.status.is_connected()
    }
}

/// Health check function trait
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
///
/// struct AlwaysUp;
///
/// #[async_trait]
/// impl HealthChecker for AlwaysUp {
///     async fn check_health(&self) -> CacheHealth {
///         CacheHealth::new(BackendStatus::Connected)
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait HealthChecker: Send + Sync {
    /// Probe the component and report its status
    async fn check_health(&self) -> CacheHealth;
}

/// Probes a shared backend handle
#[derive(Debug, Clone)]
pub struct CacheHealthChecker {
    backend: Arc<dyn KeyValueBackend>,
}

impl CacheHealthChecker {
    /// Create a checker for the given backend
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// The probed backend
    pub fn backend(&self) -> &Arc<dyn KeyValueBackend> {
        &self.backend
    }
}

#[async_trait::async_trait]
impl HealthChecker for CacheHealthChecker {
    async fn check_health(&self) -> CacheHealth {
        let start = Instant::now();
        let status = self.backend.ping().await;
        let elapsed = start.elapsed();

        let details = format!(
            "{} backend {status} after {}ms",
            self.backend.provider_name(),
            elapsed.as_millis()
        );
        log_health_check(
            HEALTH_COMPONENT_CACHE,
            status.is_connected(),
            Some(&details),
        );

        CacheHealth::new(status)
    }
}

/// Probe a backend once
pub async fn check_cache_health(backend: &Arc<dyn KeyValueBackend>) -> CacheHealth {
    CacheHealthChecker::new(Arc::clone(backend))
        .check_health()
        .await
}


//! Redis networked backend
//!
//! Shared store for every process that memoizes against the same Redis.
//!
//! ## Features
//!
//! - One multiplexed connection, established lazily and shared by cloning
//! - Every command bounded by a timeout (connection setup included)
//! - Millisecond TTLs via `PSETEX`
//! - A connection that failed is dropped and re-established on the next call
//!
//! ## Example
//!
//! ```ignore
//! use memo_providers::cache::RedisBackend;
//!
//! let backend = RedisBackend::new("redis://localhost:6379")?;
//! // Or with host/port
//! let backend = RedisBackend::with_host_port("localhost", 6379)?;
//! ```

use super::ensure_ttl;
use crate::constants::{REDIS_OPERATION_TIMEOUT_MS, REDIS_PING_TIMEOUT_MS};
use async_trait::async_trait;
use memo_domain::error::{Error, Result};
use memo_domain::ports::{BackendStatus, KeyValueBackend};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Redis backend
///
/// Cloning is cheap and clones share the same connection.
#[derive(Clone)]
pub struct RedisBackend {
    client: Client,
    address: String,
    connection: Arc<RwLock<Option<MultiplexedConnection>>>,
    operation_timeout: Duration,
    ping_timeout: Duration,
}

impl RedisBackend {
    /// Create a new Redis backend from a connection URL
    ///
    /// No connection is opened until the first command.
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis connection URL (e.g., "redis://localhost:6379")
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::configuration_with_source(format!("Invalid Redis URL: {e}"), e)
        })?;

        Ok(Self {
            client,
            address: redact_credentials(connection_string),
            connection: Arc::new(RwLock::new(None)),
            operation_timeout: Duration::from_millis(REDIS_OPERATION_TIMEOUT_MS),
            ping_timeout: Duration::from_millis(REDIS_PING_TIMEOUT_MS),
        })
    }

    /// Create a new Redis backend with host and port
    pub fn with_host_port(host: &str, port: u16) -> Result<Self> {
        Self::new(&format!("redis://{host}:{port}"))
    }

    /// Set the upper bound for GET/PSETEX round trips
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    /// Set the upper bound for liveness probes
    pub fn with_ping_timeout(mut self, timeout: Duration) -> Self {
        self.ping_timeout = timeout;
        self
    }

    /// Server address with any credentials masked
    pub fn server_address(&self) -> &str {
        &self.address
    }

    /// Upper bound for GET/PSETEX round trips
    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }

    /// Upper bound for liveness probes
    pub fn ping_timeout(&self) -> Duration {
        self.ping_timeout
    }

    /// Shared connection, opened on first use
    async fn connection(&self) -> Result<MultiplexedConnection> {
        if let Some(conn) = self.connection.read().await.as_ref() {
            return Ok(conn.clone());
        }

        let conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| unavailable("connect", e))?;
        debug!(server = %self.address, "Redis connection established");

        let mut slot = self.connection.write().await;
        // Another caller may have connected while we were dialing.
        Ok(slot.get_or_insert(conn).clone())
    }

    async fn drop_connection(&self) {
        if self.connection.write().await.take().is_some() {
            debug!(server = %self.address, "Redis connection dropped");
        }
    }

    /// Run one command under `timeout`, connection setup included
    async fn execute<T, F, Fut>(&self, command: &'static str, timeout: Duration, f: F) -> Result<T>
    where
        F: FnOnce(MultiplexedConnection) -> Fut,
        Fut: Future<Output = std::result::Result<T, RedisError>>,
    {
        let attempt = async {
            let conn = self.connection().await?;
            f(conn).await.map_err(|e| classify(command, e))
        };

        match tokio::time::timeout(timeout, attempt).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                if e.is_backend_unavailable() {
                    self.drop_connection().await;
                }
                Err(e)
            }
            Err(_) => {
                self.drop_connection().await;
                Err(Error::backend_unavailable(format!(
                    "Redis {command} timed out after {} ms",
                    timeout.as_millis()
                )))
            }
        }
    }
}

#[async_trait]
impl KeyValueBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.execute("GET", self.operation_timeout, |mut conn| async move {
            conn.get::<_, Option<Vec<u8>>>(key).await
        })
        .await
    }

    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        ensure_ttl(ttl)?;
        // Round up so the entry never expires before `ttl`.
        let millis = u64::try_from(ttl.as_nanos().div_ceil(1_000_000)).unwrap_or(u64::MAX);

        self.execute("PSETEX", self.operation_timeout, |mut conn| async move {
            conn.pset_ex::<_, _, ()>(key, value, millis).await
        })
        .await
    }

    async fn ping(&self) -> BackendStatus {
        let probe: Result<String> = self
            .execute("PING", self.ping_timeout, |mut conn| async move {
                redis::cmd("PING").query_async(&mut conn).await
            })
            .await;

        match probe {
            Ok(_) => BackendStatus::Connected,
            Err(e) => {
                warn!(server = %self.address, error = %e, "Redis liveness probe failed");
                BackendStatus::Disconnected
            }
        }
    }

    async fn shutdown(&self) {
        self.drop_connection().await;
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("server", &self.address)
            .field("operation_timeout", &self.operation_timeout)
            .field("ping_timeout", &self.ping_timeout)
            .finish_non_exhaustive()
    }
}

fn unavailable(command: &str, e: RedisError) -> Error {
    Error::backend_unavailable_with_source(format!("Redis {command} failed: {e}"), e)
}

/// Connection-level failures mean the store is unreachable; anything else
/// is a server-side reply error.
fn classify(command: &str, e: RedisError) -> Error {
    if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout()
    {
        unavailable(command, e)
    } else {
        Error::infrastructure_with_source(format!("Redis {command} failed: {e}"), e)
    }
}

/// Mask `user:password@` in a connection URL
fn redact_credentials(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}***{}", &url[..scheme_end + 3], &url[at..])
        }
        _ => url.to_string(),
    }
}

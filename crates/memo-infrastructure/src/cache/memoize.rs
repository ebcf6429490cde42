//! Memoizing wrapper
//!
//! [`Memoizer`] binds a backend handle, a namespace and a TTL.
//! [`Memoizer::wrap`] turns a computation into a [`Memoized`] one with the
//! cache-aside contract:
//!
//! 1. Derive the key from the namespace and the call inputs.
//! 2. Look the key up. A decodable entry is returned without running the
//!    computation. An undecodable entry or a backend failure is a miss.
//! 3. Run the computation. Its error is returned unchanged and nothing is
//!    stored.
//! 4. Store the JSON-encoded result with the TTL. A failed write, or a
//!    result with no JSON form (`NaN`, infinities), is logged and counted;
//!    the result is still returned.
//!
//! Cache-layer failures never reach the caller: a call either returns the
//! computation's result (computed or cached) or the computation's own error.
//!
//! ## Concurrency
//!
//! There is no per-key mutual exclusion. Concurrent calls with the same
//! inputs may all miss, all compute and all write; the last write wins.
//! Callers that need stampede protection must coordinate outside this type.
//!
//! ## Example
//!
//! ```ignore
//! use memo_infrastructure::Memoizer;
//! use std::time::Duration;
//!
//! let memo = Memoizer::new(backend, "sq", Duration::from_secs(300))?;
//! let square = memo.wrap(|x: u64| async move { Ok::<_, std::io::Error>(x * x) });
//!
//! assert_eq!(square.call(4).await?, 16); // computed and stored
//! assert_eq!(square.call(4).await?, 16); // served from the store
//! ```

use super::stats::{MemoCounters, MemoStats};
use crate::config::CacheConfig;
use memo_domain::codec::{decode_entry, encode_entry};
use memo_domain::error::{Error, Result};
use memo_domain::{CacheKey, KeyValueBackend};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Binds a backend, a namespace and a TTL for memoized computations
///
/// Cloning is cheap; clones share the backend handle and the statistics.
#[derive(Clone)]
pub struct Memoizer {
    backend: Arc<dyn KeyValueBackend>,
    namespace: String,
    ttl: Duration,
    counters: Arc<MemoCounters>,
}

impl Memoizer {
    /// Create a memoizer over a shared backend handle
    ///
    /// Fails if the namespace is not a valid key prefix or the TTL is zero.
    pub fn new<S: Into<String>>(
        backend: Arc<dyn KeyValueBackend>,
        namespace: S,
        ttl: Duration,
    ) -> Result<Self> {
        let namespace = namespace.into();
        CacheKey::validate_namespace(&namespace)?;
        if ttl.is_zero() {
            return Err(Error::configuration("Memoization TTL cannot be 0"));
        }

        Ok(Self {
            backend,
            namespace,
            ttl,
            counters: Arc::new(MemoCounters::default()),
        })
    }

    /// Create a memoizer using the configured namespace and default TTL
    pub fn from_config(backend: Arc<dyn KeyValueBackend>, config: &CacheConfig) -> Result<Self> {
        Self::new(backend, config.namespace.clone(), config.default_ttl())
    }

    /// A memoizer on the same backend under another namespace
    ///
    /// The new memoizer keeps the TTL and starts with fresh statistics.
    pub fn with_namespace<S: Into<String>>(&self, namespace: S) -> Result<Self> {
        Self::new(Arc::clone(&self.backend), namespace, self.ttl)
    }

    /// A memoizer on the same backend and namespace with another TTL
    pub fn with_ttl(&self, ttl: Duration) -> Result<Self> {
        Self::new(Arc::clone(&self.backend), self.namespace.clone(), ttl)
    }

    /// Namespace prefixed to every key
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// TTL applied to stored results
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The shared backend handle
    pub fn backend(&self) -> Arc<dyn KeyValueBackend> {
        Arc::clone(&self.backend)
    }

    /// Statistics across every computation run through this memoizer
    pub fn stats(&self) -> MemoStats {
        self.counters.snapshot()
    }

    /// Key under which the result for `args` is stored
    pub fn key_for<A: Serialize + ?Sized>(&self, args: &A) -> Result<CacheKey> {
        CacheKey::derive(&self.namespace, args)
    }

    /// Wrap a computation taking its inputs by value
    pub fn wrap<F>(&self, f: F) -> Memoized<F> {
        Memoized {
            memoizer: self.clone(),
            f,
        }
    }

    /// Memoize one call: return the stored result for `args` or run `compute`
    pub async fn get_or_compute<A, R, E, F, Fut>(
        &self,
        args: &A,
        compute: F,
    ) -> std::result::Result<R, E>
    where
        A: Serialize + ?Sized,
        R: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
    {
        let key = self.key_for(args);
        self.run(key, compute).await
    }

    async fn run<R, E, F, Fut>(
        &self,
        key: Result<CacheKey>,
        compute: F,
    ) -> std::result::Result<R, E>
    where
        R: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
    {
        let key = match key {
            Ok(key) => key,
            Err(e) => {
                self.counters.record_bypass();
                warn!(
                    namespace = %self.namespace,
                    error = %e,
                    "Call inputs not encodable, bypassing cache"
                );
                return compute().await;
            }
        };

        if let Some(cached) = self.lookup(&key).await {
            return Ok(cached);
        }

        let result = compute().await?;
        self.store(&key, &result).await;
        Ok(result)
    }

    async fn lookup<R: DeserializeOwned>(&self, key: &CacheKey) -> Option<R> {
        match self.backend.get(key.as_str()).await {
            Ok(Some(bytes)) => match decode_entry(&bytes) {
                Ok(value) => {
                    self.counters.record_hit();
                    debug!(key = %key, "Cache hit");
                    Some(value)
                }
                Err(e) => {
                    self.counters.record_decode_failure();
                    warn!(
                        key = %key,
                        error = %e,
                        "Cached entry could not be decoded, recomputing"
                    );
                    None
                }
            },
            Ok(None) => {
                self.counters.record_miss();
                debug!(key = %key, "Cache miss");
                None
            }
            Err(e) => {
                self.counters.record_read_error();
                warn!(
                    key = %key,
                    backend = self.backend.provider_name(),
                    error = %e,
                    "Cache read failed, recomputing"
                );
                None
            }
        }
    }

    async fn store<R: Serialize>(&self, key: &CacheKey, value: &R) {
        let bytes = match encode_entry(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.counters.record_store_failure();
                warn!(key = %key, error = %e, "Result could not be encoded, not cached");
                return;
            }
        };

        match self.backend.put(key.as_str(), bytes, self.ttl).await {
            Ok(()) => {
                self.counters.record_store();
                debug!(key = %key, ttl_secs = self.ttl.as_secs(), "Result cached");
            }
            Err(e) => {
                self.counters.record_store_failure();
                warn!(
                    key = %key,
                    backend = self.backend.provider_name(),
                    error = %e,
                    "Cache write failed, result returned uncached"
                );
            }
        }
    }
}

impl fmt::Debug for Memoizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoizer")
            .field("backend", &self.backend.provider_name())
            .field("namespace", &self.namespace)
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// A computation wrapped with the cache-aside contract
///
/// Created by [`Memoizer::wrap`]. Clone it (when `F: Clone`) or put it in
/// an `Arc` to share it between tasks.
#[derive(Clone)]
pub struct Memoized<F> {
    memoizer: Memoizer,
    f: F,
}

impl<F> Memoized<F> {
    /// Call the computation with `args`, consulting the store first
    pub async fn call<A, R, E, Fut>(&self, args: A) -> std::result::Result<R, E>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
        A: Serialize,
        R: Serialize + DeserializeOwned,
    {
        let key = self.memoizer.key_for(&args);
        self.memoizer.run(key, || (self.f)(args)).await
    }

    /// Key under which the result for `args` is stored
    pub fn key_for<A: Serialize + ?Sized>(&self, args: &A) -> Result<CacheKey> {
        self.memoizer.key_for(args)
    }

    /// The memoizer this computation runs through
    pub fn memoizer(&self) -> &Memoizer {
        &self.memoizer
    }

    /// Statistics of the underlying memoizer
    pub fn stats(&self) -> MemoStats {
        self.memoizer.stats()
    }
}

impl<F> fmt::Debug for Memoized<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("memoizer", &self.memoizer)
            .finish_non_exhaustive()
    }
}

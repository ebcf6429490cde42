//! Memoization call statistics

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of memoization outcomes
///
/// `misses` counts every lookup not served from the store, including the
/// ones caused by undecodable entries or backend read errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoStats {
    /// Calls answered from the store
    pub hits: u64,
    /// Calls that had to compute
    pub misses: u64,
    /// Stored entries that could not be decoded
    pub decode_failures: u64,
    /// Lookups that failed because the backend was unavailable
    pub read_errors: u64,
    /// Results written to the store
    pub stores: u64,
    /// Results that could not be written to the store
    pub store_failures: u64,
    /// Calls whose inputs could not be encoded into a key
    pub bypassed: u64,
}

impl MemoStats {
    /// Fraction of lookups answered from the store (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Lock-free counters behind [`MemoStats`]
#[derive(Debug, Default)]
pub(crate) struct MemoCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    decode_failures: AtomicU64,
    read_errors: AtomicU64,
    stores: AtomicU64,
    store_failures: AtomicU64,
    bypassed: AtomicU64,
}

impl MemoCounters {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
        self.record_miss();
    }

    pub(crate) fn record_read_error(&self) {
        self.read_errors.fetch_add(1, Ordering::Relaxed);
        self.record_miss();
    }

    pub(crate) fn record_store(&self) {
        self.stores.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_store_failure(&self) {
        self.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_bypass(&self) {
        self.bypassed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> MemoStats {
        MemoStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            read_errors: self.read_errors.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
            store_failures: self.store_failures.load(Ordering::Relaxed),
            bypassed: self.bypassed.load(Ordering::Relaxed),
        }
    }
}

//! # memocache - Backend Implementations
//!
//! Key-value store implementations of the
//! [`KeyValueBackend`](memo_domain::KeyValueBackend) port defined in
//! `memo-domain`.
//!
//! ## Backends
//!
//! | Backend | Type | Description |
//! |---------|------|-------------|
//! | [`RedisBackend`](cache::RedisBackend) | Networked | Shared store for multi-process deployments |
//! | [`MokaBackend`](cache::MokaBackend) | In-process | Per-entry TTL, single process |
//! | [`NullBackend`](cache::NullBackend) | Disabled | Never stores, always misses |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! memo-providers = { version = "0.1", default-features = false, features = ["backend-redis"] }
//! ```

// Re-export memo-domain types commonly used with providers
pub use memo_domain::error::{Error, Result};
pub use memo_domain::ports::{BackendStatus, KeyValueBackend};

/// Provider-specific constants
pub mod constants;

/// Key-value backend implementations
pub mod cache;

//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the cache-aside layer.
//!
//! ### Memoization
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | `Memoizer` wrapper, call statistics, backend factory |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration (TOML + `MEMO__` env) |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`health`] | Backend reachability check |
//! | [`logging`] | Structured logging with tracing |

pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod health;
pub mod logging;

// Re-export commonly used types
pub use cache::{Memoized, Memoizer, MemoStats};
pub use error_ext::ErrorContext;

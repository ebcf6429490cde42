//! Cache-aside memoization
//!
//! Wraps computations so their results are looked up in, and written to,
//! the shared key-value backend.
//! Backend implementations are in the `memo-providers` crate; the port and
//! key derivation are in `memo-domain`.

pub mod factory;
pub mod memoize;
pub mod stats;

pub use factory::{BackendFactory, create_backend};
pub use memoize::{Memoized, Memoizer};
pub use stats::MemoStats;

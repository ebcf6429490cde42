//! Domain Value Objects
//!
//! Immutable value objects describing one memoized call.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`CacheKey`] | Namespace plus stable digest of the call inputs |
//! | [`CallArgs`] | Positional and keyword inputs of a call |

/// Positional/keyword call inputs
pub mod call_args;
/// Cache key derivation
pub mod cache_key;

pub use cache_key::{CacheKey, canonical_encoding, input_digest};
pub use call_args::CallArgs;

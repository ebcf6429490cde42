//! # Domain Layer
//!
//! Core contracts of the cache-aside memoization layer.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`codec`] | JSON encoding of inputs and entries, rejecting non-finite floats |
//! | [`error`] | Error taxonomy shared by every crate |
//! | [`ports`] | The [`KeyValueBackend`] port implemented by providers |
//! | [`value_objects`] | [`CacheKey`] derivation and [`CallArgs`] |
//! | [`constants`] | Domain constants (delimiter, digest sizes, defaults) |
//!
//! This crate owns no I/O. Providers live in `memo-providers`, the memoizing
//! wrapper and configuration live in `memo-infrastructure`.

pub mod codec;
pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::backend::{BackendStatus, KeyValueBackend};
pub use value_objects::{CacheKey, CallArgs};

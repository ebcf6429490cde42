//! Configuration
//!
//! Typed configuration ([`AppConfig`]) and the Figment-based [`ConfigLoader`].

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::*;

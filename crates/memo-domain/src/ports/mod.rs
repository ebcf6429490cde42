//! Domain Port Interfaces
//!
//! Boundary contracts between the domain and the outer layers.
//!
//! ## Architecture
//!
//! Ports define the contracts that external layers must implement.
//! This follows the Dependency Inversion Principle:
//! - High-level modules (domain, memoizing wrapper) define interfaces
//! - Low-level modules (providers) implement them

/// Key-value backend port
pub mod backend;

pub use backend::{BackendStatus, KeyValueBackend};

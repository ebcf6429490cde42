//! Configuration types module

pub mod app;
pub mod cache;
pub mod logging;
pub mod server;

// Re-export main types
pub use app::*;

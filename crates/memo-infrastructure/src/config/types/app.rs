//! Main application configuration

use serde::{Deserialize, Serialize};

pub use super::cache::{BackendKind, CacheConfig};
pub use super::logging::LoggingConfig;
pub use super::server::ServerConfig;

/// Application configuration
///
/// Every section has defaults, so an empty TOML file (or none at all) is a
/// valid configuration pointing at a local Redis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP surface configuration
    pub server: ServerConfig,

    /// Key-value backend and memoization defaults
    pub cache: CacheConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Cache-key constants are defined in `memo_domain::constants`, backend
//! defaults in `memo_providers::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "memo.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "memo";

/// Environment variable prefix for configuration (`MEMO__CACHE__REDIS_URL`)
pub const CONFIG_ENV_PREFIX: &str = "MEMO";

/// Separator between prefix and nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Namespace used when a caller does not pick one
pub const DEFAULT_CACHE_NAMESPACE: &str = "memo";

// ============================================================================
// HTTP SERVER CONSTANTS
// ============================================================================

/// Default HTTP server port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default server host
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "MEMO_LOG";

/// Default log file stem when file output has no file name
pub const DEFAULT_LOG_FILE_STEM: &str = "memo";

// ============================================================================
// HEALTH CHECK CONSTANTS
// ============================================================================

/// Component name used for the cache backend in health logs
pub const HEALTH_COMPONENT_CACHE: &str = "cache";

//! Provider-specific constants

// ============================================================================
// REDIS BACKEND CONSTANTS
// ============================================================================

/// Local Redis used when no connection descriptor is configured
pub const REDIS_DEFAULT_URL: &str = "redis://127.0.0.1:6379";

/// Upper bound for a single GET/PSETEX round trip (milliseconds)
pub const REDIS_OPERATION_TIMEOUT_MS: u64 = 2_000;

/// Upper bound for a liveness probe, connection included (milliseconds)
pub const REDIS_PING_TIMEOUT_MS: u64 = 500;

// ============================================================================
// MOKA BACKEND CONSTANTS
// ============================================================================

/// Default maximum number of entries held in process
pub const MOKA_DEFAULT_MAX_ENTRIES: u64 = 10_000;

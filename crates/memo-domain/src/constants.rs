//! Domain layer constants
//!
//! Contains constants that are part of the cache-aside contract and shared
//! by providers and the memoizing wrapper. Infrastructure-specific constants
//! remain in `memo_infrastructure::constants`.

// ============================================================================
// CACHE KEY CONSTANTS
// ============================================================================

/// Separator between a namespace and the input digest
pub const CACHE_KEY_DELIMITER: char = ':';

/// Length of the hex-encoded SHA-256 input digest
pub const CACHE_KEY_DIGEST_HEX_LEN: usize = 64;

/// Maximum namespace length (keeps keys well below store limits)
pub const CACHE_NAMESPACE_MAX_LEN: usize = 128;

// ============================================================================
// TTL CONSTANTS
// ============================================================================

/// Default TTL for memoized results (5 minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

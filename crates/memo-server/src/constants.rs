//! Server-specific constants

/// Base path the health routes are mounted under
pub const HEALTH_MOUNT_PATH: &str = "/health";

/// Rocket configuration key for the bind address
pub const ROCKET_ADDRESS_KEY: &str = "address";

/// Rocket configuration key for the listening port
pub const ROCKET_PORT_KEY: &str = "port";

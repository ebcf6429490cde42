//! # memocache Server
//!
//! HTTP surface and command line entry points for the cache-aside layer.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use memo_server::run_server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Default config discovery (memo.toml, user config dir, MEMO__ env)
//!     run_server(None).await
//! }
//! ```
//!
//! ## Routes
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /health/cache` | `{"status":"connected"}` or `{"status":"disconnected"}` |

pub mod cli;
pub mod constants;
pub mod health;
pub mod init;

pub use cli::{Cli, Command};
pub use health::{HealthState, health_rocket};
pub use init::{ping_backend, run_server};

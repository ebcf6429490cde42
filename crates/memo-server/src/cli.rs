//! Command line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command line interface for memocache
#[derive(Parser, Debug)]
#[command(name = "memo")]
#[command(about = "memocache - cache-aside memoization over a shared key-value store")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Serve the health endpoint over HTTP
    Serve,
    /// Probe the configured backend once and print the health JSON
    ///
    /// Exits non-zero when the backend is unreachable.
    Ping,
}

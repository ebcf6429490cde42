//! memocache command line entry point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `memo serve [--config PATH]` | Serve `GET /health/cache` |
//! | `memo ping [--config PATH]` | Print the backend health JSON once |

use clap::Parser;
use memo_server::{Cli, Command, ping_backend, run_server};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => {
            run_server(cli.config.as_deref()).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Ping => {
            let health = ping_backend(cli.config.as_deref()).await?;
            println!("{}", serde_json::to_string(&health)?);
            Ok(if health.is_healthy() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

//! CLI module for the retrieval gateway
//!
//! Subcommands:
//! - `serve`: HTTP API, with the embedding worker in-process for the in-process queue
//! - `worker`: standalone embedding worker draining the Redis queue
//! - `migrate`: apply the item store migrations and exit

pub mod migrate;
pub mod serve;
pub mod worker;

use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::info;

/// PMP Retrieval Gateway - semantic search over stored items
#[derive(Parser)]
#[command(name = "pmp-retrieval-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve(serve::ServeArgs),

    /// Run the embedding worker only
    Worker,

    /// Apply database migrations and exit
    Migrate,
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

//! Worker command - drains the shared embedding queue

use tokio::sync::watch;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::infrastructure::queue::QueueType;

use super::shutdown_signal;

/// Run the embedding worker until Ctrl+C or SIGTERM
///
/// Only meaningful with the Redis queue; in-process jobs never leave the
/// `serve` process that enqueued them.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    if config.queue.backend == QueueType::InProcess {
        anyhow::bail!(
            "queue.backend is in_process; its jobs are drained by `serve`. Set queue.backend = redis to run a standalone worker"
        );
    }
    if config.database.url.is_none() {
        warn!("No database URL configured, the worker only sees its own in-memory items");
    }

    let components = crate::create_components(&config).await?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let worker = components.worker;
    let handle = tokio::spawn(async move { worker.run(shutdown_rx).await });
    info!(queue = %config.queue.queue_name, "Embedding worker started");

    shutdown_signal().await;
    let _ = shutdown_tx.send(true);
    handle.await?;

    info!("Embedding worker shutdown complete");

    Ok(())
}

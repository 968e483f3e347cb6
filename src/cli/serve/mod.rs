//! Serve command - runs the HTTP API

use std::net::SocketAddr;

use clap::Args;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::{create_router, RouterOptions};
use crate::config::AppConfig;
use crate::infrastructure::queue::QueueType;

use super::shutdown_signal;

#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Override `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Override `server.port`
    #[arg(long)]
    pub port: Option<u16>,

    /// Apply database migrations before serving
    #[arg(long)]
    pub migrate: bool,
}

/// Run the API server until Ctrl+C or SIGTERM
pub async fn run(mut config: AppConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.migrate {
        config.database.run_migrations = true;
    }

    let components = crate::create_components(&config).await?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let embedded = config.queue.backend == QueueType::InProcess;
    let worker_handle = if embedded && config.queue.embedded_worker {
        let worker = components.worker.clone();
        info!("Starting embedded embedding worker");
        Some(tokio::spawn(async move { worker.run(shutdown_rx).await }))
    } else {
        if embedded {
            warn!("In-process queue without the embedded worker: deferred embeddings will not run");
        }
        None
    };

    let options = RouterOptions {
        request_timeout: config.server.request_timeout(),
        metrics_path: config.metrics.path.clone(),
    };
    let app = create_router(components.state, &options);

    let addr = build_socket_addr(&config)?;
    info!("Starting API server on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    let _ = shutdown_tx.send(true);
    if let Some(handle) = worker_handle {
        if let Err(e) = handle.await {
            warn!(error = %e, "Embedding worker task failed");
        }
    }

    info!("API server shutdown complete");

    Ok(())
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_socket_addr() {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 9090;

        let addr = build_socket_addr(&config).unwrap();

        assert_eq!(addr.to_string(), "127.0.0.1:9090");
    }

    #[test]
    fn test_build_socket_addr_rejects_hostname() {
        let mut config = AppConfig::default();
        config.server.host = "localhost".to_string();

        assert!(build_socket_addr(&config).is_err());
    }
}

use std::sync::Arc;

use anyhow::Context;
use burrow_gateway::cli::{Cli, StorageBackendArg};
use burrow_gateway::{telemetry, App, AppState};
use burrow_shortener::ShortenerService;
use burrow_storage::{
    InMemoryRepository, MySqlRepository, MySqlSettings, Repository, TimeoutRepository,
};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();
    telemetry::init(config.log_format)?;

    info!(
        listen_host = %config.listen_host,
        port = config.port,
        storage_backend = %config.storage,
        store_timeout = ?config.store_timeout(),
        status_policy = ?config.status_policy,
        "starting gateway"
    );

    match config.storage {
        StorageBackendArg::InMemory => run_server(&config, InMemoryRepository::new()).await,
        StorageBackendArg::Mysql => {
            let settings = MySqlSettings::builder()
                .max_connections(config.mysql_max_connections)
                .acquire_timeout(config.store_timeout())
                .build();
            let repository = MySqlRepository::connect(&config.mysql_dsn, settings)
                .await
                .context("failed to connect to mysql")?;
            repository
                .migrate()
                .await
                .context("failed to apply mysql migrations")?;
            run_server(&config, repository).await
        }
    }
}

async fn run_server<R: Repository>(config: &Cli, repository: R) -> anyhow::Result<()> {
    let service = Arc::new(ShortenerService::new(TimeoutRepository::new(
        repository,
        config.store_timeout(),
    )));
    let state = AppState::new(
        service.clone(),
        config.public_host.clone(),
        config.status_policy,
    );

    let listener = TcpListener::bind((config.listen_host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.listen_host, config.port))?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    service.repository().close().await;
    info!("gateway stopped");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

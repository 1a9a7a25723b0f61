use anyhow::Context;
use clap::Args;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::{DatabaseManager, MemoryStore, PgStore, Store};
use crate::state::AppState;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Keep all data in process memory instead of PostgreSQL")]
    pub in_memory: bool,

    #[arg(long, help = "Port to listen on (overrides API_PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Address to bind (overrides API_HOST)")]
    pub host: Option<String>,
}

pub async fn handle(args: ServeArgs, mut config: AppConfig) -> anyhow::Result<()> {
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if let Some(host) = args.host {
        config.api.host = host;
    }

    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set before the server can issue tokens");
    }

    let store: Arc<dyn Store> = if args.in_memory {
        tracing::warn!("Running with the in-memory store; data is lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to the database")?;
        DatabaseManager::migrate(&pool)
            .await
            .context("failed to apply the database schema")?;
        Arc::new(PgStore::new(pool))
    };

    let bind_addr = config.bind_addr();
    let state = AppState::new(config, store);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Schedule API listening on http://{}", bind_addr);

    axum::serve(listener, crate::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

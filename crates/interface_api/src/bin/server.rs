//! Claims Desk - API Server Binary
//!
//! # Usage
//!
//! ```bash
//! # Run against PostgreSQL
//! DATABASE_URL=postgres://... cargo run --bin claims-api
//!
//! # Run with the in-memory store
//! API_STORE=memory cargo run --bin claims-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` / `DATABASE_URL` - PostgreSQL connection string
//! * `API_STORE` - `postgres` (default) or `memory`
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_claims::ports::memory::InMemoryClaimRepository;
use domain_claims::ClaimRepository;
use infra_db::{create_pool, run_migrations, DatabaseConfig, PgClaimRepository};
use interface_api::config::{ApiConfig, ClaimStoreKind};
use interface_api::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Failed to load configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        store = %config.store,
        "Starting Claims Desk API Server"
    );

    let repository = build_repository(&config).await?;
    let app = create_router(AppState::new(repository));

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber; `RUST_LOG` wins over the configured level
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn build_repository(config: &ApiConfig) -> anyhow::Result<Arc<dyn ClaimRepository>> {
    match config.store {
        ClaimStoreKind::Postgres => {
            let pool = create_pool(DatabaseConfig::new(&config.database_url))
                .await
                .context("Failed to connect to database")?;
            run_migrations(&pool).await?;
            Ok(Arc::new(PgClaimRepository::new(pool)))
        }
        ClaimStoreKind::Memory => {
            tracing::warn!("Using the in-memory claim store; data is lost on shutdown");
            Ok(Arc::new(InMemoryClaimRepository::new()))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

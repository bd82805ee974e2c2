//! Runs the IBWT HTTP server.
//!
//! Configuration comes from the environment; see [`ibwt::config::AppConfig`].
//! The server stops gracefully on Ctrl-C.

use ibwt::api::{self, AppState};
use ibwt::config::AppConfig;
use ibwt::database;
use ibwt::telemetry::init_tracing;
use ibwt::waitlist::{adapters::postgres::PostgresWaitlistRepository, services::WaitlistService};
use mockable::DefaultClock;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::from_env()?;
    init_tracing(&config.log)?;

    let pool = database::connect(&config.database_url, config.pool_size)?;
    let repository = Arc::new(PostgresWaitlistRepository::new(pool));
    let service = WaitlistService::new(repository, Arc::new(DefaultClock));
    let router = api::router(AppState::new(service));

    let listener = TcpListener::bind(config.bind_address).await?;
    api::serve(listener, router, shutdown_signal()).await?;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for Ctrl-C; shutting down");
    }
}

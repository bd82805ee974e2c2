//! HTTP surface of the marketplace backend.
//!
//! Routes:
//!
//! - `POST /api/waitlist` joins the waitlist
//! - `GET /health` liveness check

mod error;
mod waitlist;

pub use error::{ApiError, ErrorResponse};
pub use waitlist::JoinWaitlistResponse;

use crate::waitlist::{ports::WaitlistRepository, services::WaitlistService};
use axum::{
    Router,
    routing::{get, post},
};
use mockable::Clock;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Shared handler state.
pub struct AppState<R, C>
where
    R: WaitlistRepository,
    C: Clock + Send + Sync,
{
    waitlist: WaitlistService<R, C>,
}

impl<R, C> AppState<R, C>
where
    R: WaitlistRepository,
    C: Clock + Send + Sync,
{
    /// Creates handler state around the waitlist service.
    #[must_use]
    pub const fn new(waitlist: WaitlistService<R, C>) -> Self {
        Self { waitlist }
    }
}

/// Builds the application router.
#[must_use]
pub fn router<R, C>(state: AppState<R, C>) -> Router
where
    R: WaitlistRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/waitlist", post(waitlist::join_waitlist::<R, C>))
        .with_state(Arc::new(state))
}

/// Serves `router` on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(address) = listener.local_addr() {
        info!(%address, "HTTP server listening");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health() -> &'static str {
    "OK"
}

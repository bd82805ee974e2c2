//! `POST /api/waitlist` handler.

use super::{ApiError, AppState};
use crate::waitlist::{
    ports::WaitlistRepository,
    services::{JoinWaitlistRequest, WaitlistError},
};
use axum::{Json, body::Bytes, extract::State};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

const INVALID_EMAIL: &str = "Valid email required";
const JOIN_FAILED: &str = "Failed to join waitlist";

/// Body returned after a successful signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinWaitlistResponse {
    /// Always `true`.
    pub success: bool,
}

/// Joins the waitlist.
///
/// A body that is not a JSON object with the expected field types is
/// treated as a submission without an email.
pub(super) async fn join_waitlist<R, C>(
    State(state): State<Arc<AppState<R, C>>>,
    body: Bytes,
) -> Result<Json<JoinWaitlistResponse>, ApiError>
where
    R: WaitlistRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let request = serde_json::from_slice::<JoinWaitlistRequest>(&body).unwrap_or_else(|err| {
        warn!(error = %err, "unparseable waitlist body");
        JoinWaitlistRequest::default()
    });

    match state.waitlist.join(request).await {
        Ok(_) => Ok(Json(JoinWaitlistResponse { success: true })),
        Err(WaitlistError::Validation(_)) => Err(ApiError::BadRequest(INVALID_EMAIL)),
        Err(WaitlistError::Repository(err)) => {
            error!(error = %err, "failed to join waitlist");
            Err(ApiError::Internal(JOIN_FAILED))
        }
    }
}

//! Router for the health probe

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};

use super::public;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

// Always 200. A conferencing client that failed to construct at
// startup shows up as "unavailable" rather than an error.
async fn health(State(state): State<SharedState>) -> Json<public::HealthResponse> {
    Json(public::HealthResponse {
        status: "healthy",
        telemost_api: if state.telemost.is_some() {
            "available"
        } else {
            "unavailable"
        },
    })
}

/// Create the health router
pub fn router() -> Router<SharedState> {
    Router::new().route("/health", get(health))
}

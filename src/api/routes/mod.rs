//! API routes module

pub mod health;
pub mod meetings;
pub mod notify;

use std::sync::Arc;

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<AppState>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Meeting CRUD routes
        .merge(meetings::router())
        // Invitation delivery routes
        .merge(notify::router())
        // Health probe
        .merge(health::router())
}

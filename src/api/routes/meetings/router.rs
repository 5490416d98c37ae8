//! Router for the meetings API

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use axum_extra::extract::Query;
use http::StatusCode;
use serde_json::Value;

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::telemost::TelemostClient;

type SharedState = Arc<AppState>;

fn client(state: &AppState) -> Result<&TelemostClient, ApiError> {
    state
        .telemost
        .as_ref()
        .ok_or_else(ApiError::client_unavailable)
}

// Create meeting endpoint
async fn create_meeting(
    State(state): State<SharedState>,
    Json(req): Json<public::CreateMeetingRequest>,
) -> Result<(StatusCode, Json<public::CreateMeetingResponse>), ApiError> {
    let client = client(&state)?;

    tracing::info!(
        "Creating meeting: waiting_room_level={}, title={}",
        req.waiting_room_level,
        req.title
    );

    let result = client
        .create_meeting(
            &req.waiting_room_level,
            req.live_stream.as_ref(),
            req.cohosts.as_deref(),
        )
        .await?;

    let resp = public::CreateMeetingResponse {
        id: result.get("id").cloned(),
        join_url: result.get("join_url").cloned(),
        waiting_room_level: result.get("waiting_room_level").cloned(),
        created_at: result.get("created_at").cloned(),
        title: req.title,
        description: req.description,
        live_stream: result.get("live_stream").cloned(),
    };

    Ok((StatusCode::CREATED, Json(resp)))
}

// Get meeting endpoint
async fn get_meeting(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let result = client(&state)?.get_meeting(&id).await?;
    Ok(Json(result))
}

// List meetings endpoint
async fn list_meetings(
    State(state): State<SharedState>,
    Query(params): Query<public::ListMeetingsQuery>,
) -> Result<Json<Value>, ApiError> {
    let result = client(&state)?
        .list_meetings(params.limit, params.offset)
        .await?;
    Ok(Json(result))
}

// Update meeting endpoint
async fn update_meeting(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<public::UpdateMeetingRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = client(&state)?
        .update_meeting(&id, req.waiting_room_level.as_deref(), req.live_stream.as_ref())
        .await?;
    Ok(Json(result))
}

// Delete meeting endpoint
async fn delete_meeting(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let result = client(&state)?.delete_meeting(&id).await?;
    Ok(Json(result))
}

/// Create the meetings router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/meetings", post(create_meeting).get(list_meetings))
        .route(
            "/meetings/{id}",
            get(get_meeting).patch(update_meeting).delete(delete_meeting),
        )
}

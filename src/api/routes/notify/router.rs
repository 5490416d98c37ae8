//! Router for the notification API

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::telegram::BotStatus;

type SharedState = Arc<AppState>;

// Send meeting link to contacts endpoint
async fn send_meeting(
    State(state): State<SharedState>,
    Json(req): Json<public::SendMeetingRequest>,
) -> Result<Json<public::SendMeetingResponse>, ApiError> {
    let Some(meeting) = req.meeting_data else {
        return Err(ApiError::bad_request("Meeting data is required"));
    };
    if req.contacts.is_empty() {
        return Err(ApiError::bad_request("At least one contact is required"));
    }

    tracing::info!(
        "Sending meeting {} to {} contacts",
        meeting.id.as_deref().unwrap_or("unknown"),
        req.contacts.len()
    );

    let report = state
        .bot
        .send_bulk_invitations(&req.contacts, &meeting, req.custom_message.as_deref())
        .await;

    let resp = if report.simulated {
        public::SendMeetingResponse {
            success: true,
            sent_count: report.sent_count,
            failed_count: None,
            message: format!(
                "Simulation: Meeting link would be sent to {} contacts",
                report.sent_count
            ),
            note: Some("Telegram bot token not configured - this is a simulation".to_string()),
            errors: Vec::new(),
        }
    } else {
        public::SendMeetingResponse {
            success: report.success,
            sent_count: report.sent_count,
            failed_count: Some(report.failed_count),
            message: format!("Meeting link sent to {} contacts", report.sent_count),
            note: None,
            errors: report.errors,
        }
    };

    Ok(Json(resp))
}

// Bot status endpoint. Probing failures fold into the response body,
// the route itself always answers 200.
async fn bot_status(State(state): State<SharedState>) -> Json<BotStatus> {
    Json(state.bot.check_status().await)
}

/// Create the notification router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/send-meeting", post(send_meeting))
        .route("/bot-status", get(bot_status))
}
